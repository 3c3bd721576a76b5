//! Lexer tests

use proptest::prelude::*;
use scrawl::Error;
use scrawl::lexer::{TokenKind, TokenValue, lex};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).unwrap().iter().map(|t| t.kind).collect()
}

#[test]
fn test_lex_empty() {
    let tokens = lex("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_lex_whitespace() {
    let tokens = lex("   \t\r\n  ").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_lex_simple_let() {
    let tokens = lex("let x = 42;").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[1].value, Some(TokenValue::Str("x".into())));
    assert_eq!(tokens[2].kind, TokenKind::Eq);
    assert_eq!(tokens[3].kind, TokenKind::IntLit);
    assert_eq!(tokens[3].value, Some(TokenValue::Int(42)));
    assert_eq!(tokens[4].kind, TokenKind::Semi);
    assert_eq!(tokens[5].kind, TokenKind::Eof);
}

#[test]
fn test_lex_keywords() {
    assert_eq!(
        kinds("let if while print load exec true false read"),
        vec![
            TokenKind::Let,
            TokenKind::If,
            TokenKind::While,
            TokenKind::Print,
            TokenKind::Load,
            TokenKind::Exec,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Read,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_keywords_are_case_sensitive() {
    let tokens = lex("Let WHILE").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
}

#[test]
fn test_lex_keyword_prefix_is_identifier() {
    let tokens = lex("letter iffy print2").unwrap();
    assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Ident));
    assert_eq!(tokens[2].value, Some(TokenValue::Str("print2".into())));
}

#[test]
fn test_lex_digit_first_run_splits() {
    let tokens = lex("12abc").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::IntLit);
    assert_eq!(tokens[0].value, Some(TokenValue::Int(12)));
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[1].value, Some(TokenValue::Str("abc".into())));
}

#[test]
fn test_lex_operators() {
    assert_eq!(
        kinds("+ - * / ( ) { } = ! ; == != < <= > >="),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Eq,
            TokenKind::Bang,
            TokenKind::Semi,
            TokenKind::EqEq,
            TokenKind::Ne,
            TokenKind::Lt,
            TokenKind::Le,
            TokenKind::Gt,
            TokenKind::Ge,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_token_kind_categories() {
    assert!(TokenKind::IntLit.is_literal());
    assert!(TokenKind::True.is_literal() && TokenKind::True.is_keyword());
    assert!(TokenKind::Ge.is_operator());
    assert!(!TokenKind::Semi.is_operator() && !TokenKind::Semi.is_literal());
}

#[test]
fn test_lex_two_char_operators_without_spaces() {
    assert_eq!(
        kinds("a<=b==!c"),
        vec![
            TokenKind::Ident,
            TokenKind::Le,
            TokenKind::Ident,
            TokenKind::EqEq,
            TokenKind::Bang,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_string() {
    let tokens = lex(r#"print "hello world";"#).unwrap();
    assert_eq!(tokens[1].kind, TokenKind::StringLit);
    assert_eq!(tokens[1].value, Some(TokenValue::Str("hello world".into())));
}

#[test]
fn test_lex_empty_string() {
    let tokens = lex(r#""""#).unwrap();
    assert_eq!(tokens[0].value, Some(TokenValue::Str(String::new())));
}

#[test]
fn test_lex_unterminated_string_fails() {
    let err = lex(r#"print "oops;"#).unwrap_err();
    assert!(matches!(err, Error::Lex { ref reason, line: 1, .. } if reason.contains("unterminated")));
    assert!(matches!(lex("\"").unwrap_err(), Error::Lex { .. }));
}

#[test]
fn test_lex_unknown_character_fails() {
    for source in ["let x = 1 % 2;", "a_b", "x\u{c}", "é"] {
        assert!(
            matches!(lex(source), Err(Error::Lex { .. })),
            "expected lexer error for {:?}",
            source
        );
    }
}

#[test]
fn test_lex_error_reports_line() {
    let err = lex("let a;\nlet b;\n@").unwrap_err();
    assert_eq!(
        err,
        Error::Lex {
            text: "@".into(),
            reason: "unrecognized character".into(),
            line: 3,
        }
    );
}

#[test]
fn test_lex_integer_out_of_range() {
    let err = lex("99999999999999999999").unwrap_err();
    assert!(matches!(err, Error::Lex { ref reason, .. } if reason.contains("out of range")));
}

#[test]
fn test_lex_exactly_one_eof() {
    let tokens = lex("if (x) { print 1; }").unwrap();
    let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
    assert_eq!(eofs, 1);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
}

proptest! {
    #[test]
    fn prop_number_literal_keeps_its_value(n in 0i64..=i64::MAX) {
        let tokens = lex(&n.to_string()).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::IntLit);
        prop_assert_eq!(&tokens[0].value, &Some(TokenValue::Int(n)));
    }

    #[test]
    fn prop_identifiers_lex_to_one_token(name in "[a-zA-Z][a-zA-Z0-9]{0,12}") {
        let tokens = lex(&name).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        if !tokens[0].kind.is_keyword() {
            prop_assert_eq!(tokens[0].kind, TokenKind::Ident);
            prop_assert_eq!(tokens[0].name(), Some(name.as_str()));
        }
    }
}
