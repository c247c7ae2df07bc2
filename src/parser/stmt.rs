use crate::{
    ast::{
        expressions::ArithOp,
        statements::{AssignTarget, Stmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_condition, parse_expr, parse_index},
        lookups::BindingPower,
    },
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();
    match parser.get_stmt_lookup().get(&kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected()),
    }
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.advance().line;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected_detailed("unclosed block, expected `}`"));
        }
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::Block { body, line })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.advance().line;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let then_body = Box::new(parse_stmt(parser)?);

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If {
        condition,
        then_body,
        else_body,
        line,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.advance().line;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::While {
        condition,
        body,
        line,
    })
}

/// `for i = begin : end body`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.advance().line;

    let error = parser.unexpected_detailed("expected the loop variable after `for`");
    let variable = parser.expect_error(TokenKind::Identifier, Some(error))?.value;
    parser.expect(TokenKind::Assignment)?;

    let begin = parse_expr(parser, BindingPower::Default)?;
    let error = parser.unexpected_detailed("expected `:` between the loop bounds");
    parser.expect_error(TokenKind::Colon, Some(error))?;
    let end = parse_expr(parser, BindingPower::Default)?;

    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::For {
        variable,
        begin,
        end,
        body,
        line,
    })
}

pub fn parse_loop_control_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();
    parser.expect(TokenKind::Semicolon)?;

    match token.kind {
        TokenKind::Break => Ok(Stmt::Break { line: token.line }),
        _ => Ok(Stmt::Continue { line: token.line }),
    }
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.advance().line;

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return { value, line })
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.advance().line;

    let mut values = vec![parse_expr(parser, BindingPower::Default)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        values.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Print { values, line })
}

/// `name = value;`, `name[index] = value;` or `name op= value;`
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let name_token = parser.expect(TokenKind::Identifier)?;
    let line = name_token.line;

    let target = if parser.current_token_kind() == TokenKind::OpenBracket {
        AssignTarget::Indexed {
            name: name_token.value,
            index: parse_index(parser)?,
        }
    } else {
        AssignTarget::Name(name_token.value)
    };

    let op = match parser.current_token_kind() {
        TokenKind::Assignment => None,
        TokenKind::PlusEquals => Some(ArithOp::Add),
        TokenKind::MinusEquals => Some(ArithOp::Sub),
        TokenKind::StarEquals => Some(ArithOp::Mul),
        TokenKind::SlashEquals => Some(ArithOp::Div),
        _ => return Err(parser.unexpected_detailed("expected an assignment operator")),
    };

    if op.is_some() && matches!(target, AssignTarget::Indexed { .. }) {
        return Err(parser.unexpected_detailed("compound assignment needs a plain variable name"));
    }

    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(match (op, target) {
        (Some(op), AssignTarget::Name(name)) => Stmt::CompoundAssign {
            name,
            op,
            value,
            line,
        },
        (_, target) => Stmt::Assign {
            target,
            value,
            line,
        },
    })
}
