//! Unit tests for the lexer module.

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("if else for while break continue return print eye zeros ones").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::If);
    assert_eq!(tokens[1].kind, TokenKind::Else);
    assert_eq!(tokens[2].kind, TokenKind::For);
    assert_eq!(tokens[3].kind, TokenKind::While);
    assert_eq!(tokens[4].kind, TokenKind::Break);
    assert_eq!(tokens[5].kind, TokenKind::Continue);
    assert_eq!(tokens[6].kind, TokenKind::Return);
    assert_eq!(tokens[7].kind, TokenKind::Print);
    assert_eq!(tokens[8].kind, TokenKind::Eye);
    assert_eq!(tokens[9].kind, TokenKind::Zeros);
    assert_eq!(tokens[10].kind, TokenKind::Ones);
    assert_eq!(tokens[11].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar_1 _x iffy").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar_1");
    assert_eq!(tokens[2].value, "_x");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "iffy");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 1. .5 1e3 2.5E-2").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[3].value, "1.");
    assert_eq!(tokens[4].kind, TokenKind::Float);
    assert_eq!(tokens[4].value, ".5");
    assert_eq!(tokens[5].kind, TokenKind::Float);
    assert_eq!(tokens[5].value, "1e3");
    assert_eq!(tokens[6].kind, TokenKind::Float);
    assert_eq!(tokens[6].value, "2.5E-2");
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "two words" "esc\"aped\n""#).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "two words");
    assert_eq!(tokens[2].value, "esc\"aped\n");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_dotted_operators() {
    assert_eq!(
        kinds("A .+ B .- C .* D ./ E"),
        vec![
            TokenKind::Identifier,
            TokenKind::DotPlus,
            TokenKind::Identifier,
            TokenKind::DotDash,
            TokenKind::Identifier,
            TokenKind::DotStar,
            TokenKind::Identifier,
            TokenKind::DotSlash,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_assignment_operators() {
    assert_eq!(
        kinds("= += -= *= /="),
        vec![
            TokenKind::Assignment,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_relational_operators() {
    assert_eq!(
        kinds("< <= > >= == !="),
        vec![
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) [ ] { } ; : , ' + - * /"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::Apostrophe,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_transpose_after_identifier() {
    assert_eq!(
        kinds("B = A';"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Identifier,
            TokenKind::Apostrophe,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("x = 1; # trailing comment\n# whole line\ny = 2;"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_line_numbers() {
    let tokens = tokenize("a = 1;\n\nb = 2;\n# note\nprint b;").unwrap();

    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[4].line, 3);
    assert_eq!(tokens[8].line, 5);
    assert_eq!(tokens.last().unwrap().line, 5);
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("x = 1;\ny = @;").unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}
