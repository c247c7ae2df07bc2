use crate::{
    ast::expressions::{BinaryOp, Condition, Expr, Generator, Index, RelOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected());
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected());
        };

        let binding_power = parser.current_binding_power();
        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

fn number_error(token: &Token) -> Error {
    Error::new(
        ErrorImpl::NumberParseError {
            token: token.value.clone(),
        },
        token.line,
    )
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    let line = token.line;

    match token.kind {
        TokenKind::Integer => {
            let value = token.value.parse().map_err(|_| number_error(&token))?;
            Ok(Expr::Int { value, line })
        }
        TokenKind::Float => {
            let value = token.value.parse().map_err(|_| number_error(&token))?;
            Ok(Expr::Float { value, line })
        }
        TokenKind::String => Ok(Expr::Str {
            value: token.value,
            line,
        }),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            line,
        )),
    }
}

/// A variable reference, or an indexed reference when followed by `[`.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    if parser.current_token_kind() == TokenKind::OpenBracket {
        let index = parse_index(parser)?;
        return Ok(Expr::Indexed {
            name: token.value,
            index,
            line: token.line,
        });
    }

    Ok(Expr::Variable {
        name: token.value,
        line: token.line,
    })
}

/// `[i]`, `[i, j]`, `[a:b]`, `[:b]` or `[a:]`, brackets included.
pub fn parse_index(parser: &mut Parser) -> Result<Index, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let index = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        if parser.current_token_kind() == TokenKind::CloseBracket {
            return Err(parser.unexpected_detailed("a slice needs at least one bound"));
        }
        let end = parse_expr(parser, BindingPower::Default)?;
        Index::Slice {
            begin: None,
            end: Some(Box::new(end)),
        }
    } else {
        let first = Box::new(parse_expr(parser, BindingPower::Default)?);
        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
                let second = parse_expr(parser, BindingPower::Default)?;
                Index::Double(first, Box::new(second))
            }
            TokenKind::Colon => {
                parser.advance();
                let end = if parser.current_token_kind() == TokenKind::CloseBracket {
                    None
                } else {
                    Some(Box::new(parse_expr(parser, BindingPower::Default)?))
                };
                Index::Slice {
                    begin: Some(first),
                    end,
                }
            }
            _ => Index::Single(first),
        }
    };

    parser.expect(TokenKind::CloseBracket)?;
    Ok(index)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();

    let op = match operator_token.kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::DotPlus => BinaryOp::DotAdd,
        TokenKind::DotDash => BinaryOp::DotSub,
        TokenKind::DotStar => BinaryOp::DotMul,
        TokenKind::DotSlash => BinaryOp::DotDiv,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.line,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary {
        op,
        line: left.line(),
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Negate {
        operand: Box::new(operand),
        line: operator_token.line,
    })
}

pub fn parse_transpose_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();

    Ok(Expr::Transpose {
        line: left.line(),
        operand: Box::new(left),
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// A non-empty bracketed, comma separated list of expressions.
fn parse_elements(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    if parser.current_token_kind() == TokenKind::CloseBracket {
        return Err(parser.unexpected_detailed("vectors and matrix rows need at least one element"));
    }

    let mut elements = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        elements.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() != TokenKind::CloseBracket {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseBracket)?;
    Ok(elements)
}

/// `[a, b, c]`, or a matrix `[[a, b], [c, d]]` when the first element is
/// itself a bracketed row.
pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let line = parser.line();
    if parser.peek_kind() != TokenKind::OpenBracket {
        let elements = parse_elements(parser)?;
        return Ok(Expr::Vector { elements, line });
    }

    parser.expect(TokenKind::OpenBracket)?;
    let mut rows = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        if parser.current_token_kind() != TokenKind::OpenBracket {
            return Err(parser.unexpected_detailed("expected a bracketed matrix row"));
        }
        rows.push(parse_elements(parser)?);

        if parser.current_token_kind() != TokenKind::CloseBracket {
            parser.expect(TokenKind::Comma)?;
        }
    }
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Matrix { rows, line })
}

/// `zeros(n)`, `ones(n)` or `eye(n)` with an integer literal `n`.
pub fn parse_generator_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    let kind = match token.kind {
        TokenKind::Zeros => Generator::Zeros,
        TokenKind::Ones => Generator::Ones,
        TokenKind::Eye => Generator::Eye,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.line,
            ))
        }
    };

    parser.expect(TokenKind::OpenParen)?;
    let error = parser.unexpected_detailed("generator size must be an integer literal");
    let size_token = parser.expect_error(TokenKind::Integer, Some(error))?;
    let size = size_token
        .value
        .parse()
        .map_err(|_| number_error(&size_token))?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Generator {
        kind,
        size,
        line: token.line,
    })
}

/// `expr relop expr`, the condition of an `if` or `while`.
pub fn parse_condition(parser: &mut Parser) -> Result<Condition, Error> {
    let left = parse_expr(parser, BindingPower::Default)?;

    let op = match parser.current_token_kind() {
        TokenKind::Less => RelOp::Less,
        TokenKind::LessEquals => RelOp::LessEquals,
        TokenKind::Greater => RelOp::Greater,
        TokenKind::GreaterEquals => RelOp::GreaterEquals,
        TokenKind::Equals => RelOp::Equals,
        TokenKind::NotEquals => RelOp::NotEquals,
        _ => return Err(parser.unexpected_detailed("expected a comparison operator")),
    };
    parser.advance();

    let right = parse_expr(parser, BindingPower::Default)?;

    Ok(Condition {
        op,
        line: left.line(),
        left,
        right,
    })
}
