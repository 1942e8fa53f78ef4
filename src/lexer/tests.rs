//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integer, real, octal, hex) and malformed numbers
//! - String literals with escapes
//! - Punctuation, comments and unknown characters
//! - Location tracking

use test_log::test;

use super::{
    lexer::{tokenize, Lexer},
    tokens::{lookup_keyword, TokenClass, TokenKind, RESERVED_LOOKUP},
};
use crate::Location;

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("validate function", None);

    assert_eq!(tokens[0].class, TokenClass::Keyword);
    assert_eq!(tokens[0].kind(), Some(TokenKind::Validate));
    assert!(!tokens[0].uses_text());
    assert_eq!(tokens[1].class, TokenClass::Keyword);
    assert_eq!(tokens[1].kind(), Some(TokenKind::Function));
    assert!(!tokens[1].uses_text());
    assert!(tokens[2].is_eof());
}

#[test]
fn test_tokenize_identifiers() {
    let names = ["foo", "bar_1", "_under", "Validate", "functions", "valid", "x9"];
    for name in names {
        let tokens = tokenize(name, None);
        assert_eq!(tokens[0].class, TokenClass::Identifier, "{}", name);
        assert_eq!(tokens[0].as_str(), name);
        assert!(tokens[0].uses_text());
        assert!(tokens[1].is_eof());
    }
}

#[test]
fn test_keyword_table_is_sorted() {
    assert!(RESERVED_LOOKUP.windows(2).all(|pair| pair[0].0 < pair[1].0));
    assert_eq!(lookup_keyword("function"), Some(TokenKind::Function));
    assert_eq!(lookup_keyword("validate"), Some(TokenKind::Validate));
    assert_eq!(lookup_keyword("func"), None);
    assert_eq!(lookup_keyword("zzz"), None);
}

#[test]
fn test_number_literals_round_trip() {
    let cases = [
        ("42", TokenClass::IntLiteral),
        ("0", TokenClass::IntLiteral),
        ("3.14", TokenClass::RealLiteral),
        (".5", TokenClass::RealLiteral),
        ("1.", TokenClass::RealLiteral),
        ("0.25", TokenClass::RealLiteral),
        ("1e10", TokenClass::RealLiteral),
        ("2.5E-3", TokenClass::RealLiteral),
        ("6e+2", TokenClass::RealLiteral),
        ("017", TokenClass::OctLiteral),
        ("00", TokenClass::OctLiteral),
        ("0x1F", TokenClass::HexLiteral),
        ("0XaB", TokenClass::HexLiteral),
    ];

    for (literal, class) in cases {
        let tokens = tokenize(literal, None);
        assert_eq!(tokens[0].class, class, "{}", literal);
        assert_eq!(tokens[0].as_str(), literal);
        assert!(tokens[0].is_number());
        assert!(tokens[1].is_eof(), "{} lexed as more than one token", literal);
    }
}

#[test]
fn test_numbers_end_at_delimiters() {
    let tokens = tokenize("(1,2.5)", None);

    assert!(tokens[0].is_operator(TokenKind::LParen));
    assert_eq!(tokens[1].as_str(), "1");
    assert!(tokens[2].is_operator(TokenKind::Comma));
    assert_eq!(tokens[3].as_str(), "2.5");
    assert!(tokens[4].is_operator(TokenKind::RParen));
    assert!(tokens[5].is_eof());
}

#[test]
fn test_malformed_numbers() {
    let tokens = tokenize("1.2.3", None);
    assert_eq!(tokens[0].class, TokenClass::Unknown);
    assert_eq!(tokens[0].as_str(), "1.2.");
    assert_eq!(tokens[1].class, TokenClass::IntLiteral);
    assert_eq!(tokens[1].as_str(), "3");

    let tokens = tokenize("1e5e3", None);
    assert_eq!(tokens[0].class, TokenClass::Unknown);
    assert_eq!(tokens[0].as_str(), "1e5e");
    assert_eq!(tokens[1].as_str(), "3");

    let tokens = tokenize("1e+)", None);
    assert_eq!(tokens[0].class, TokenClass::Unknown);
    assert_eq!(tokens[0].as_str(), "1e+");
    assert!(tokens[1].is_operator(TokenKind::RParen));

    let tokens = tokenize("08", None);
    assert_eq!(tokens[0].class, TokenClass::Unknown);
    assert_eq!(tokens[0].as_str(), "08");

    let tokens = tokenize("0x ", None);
    assert_eq!(tokens[0].class, TokenClass::Unknown);
    assert_eq!(tokens[0].as_str(), "0x");

    let tokens = tokenize(". ,", None);
    assert_eq!(tokens[0].class, TokenClass::Unknown);
    assert_eq!(tokens[0].as_str(), ".");
    assert!(tokens[1].is_operator(TokenKind::Comma));
}

#[test]
fn test_lexical_errors_need_notifications() {
    let mut lex = Lexer::new("1.2.3 08 0x", None);
    while !lex.next_token().is_eof() {}
    assert!(lex.take_errors().is_empty());

    let mut lex = Lexer::new("1.2.3 08 0x", None);
    lex.set_error_notifications(true);
    while !lex.next_token().is_eof() {}

    let errors = lex.take_errors();
    let names: Vec<&str> = errors.iter().map(|error| error.get_error_name()).collect();
    assert_eq!(names, vec!["RepeatedDot", "InvalidOctalDigit", "HexDigitExpected"]);
    assert!(lex.take_errors().is_empty());
}

#[test]
fn test_bad_octal_consumes_digit_run() {
    let tokens = tokenize("089 1", None);
    assert_eq!(tokens[0].class, TokenClass::Unknown);
    assert_eq!(tokens[0].as_str(), "089");
    assert_eq!(tokens[1].class, TokenClass::IntLiteral);
    assert_eq!(tokens[1].as_str(), "1");

    let mut lex = Lexer::new("0789)", None);
    lex.set_error_notifications(true);
    let token = lex.next_token();
    assert_eq!(token.as_str(), "0789");
    assert!(lex.next_token().is_operator(TokenKind::RParen));

    let errors = lex.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "InvalidOctalDigit");
    assert_eq!(errors[0].get_location(), Location::new(1, 3));
}

#[test]
fn test_unrecognised_characters() {
    let mut lex = Lexer::new("@ $", None);
    while !lex.next_token().is_eof() {}
    assert!(lex.take_errors().is_empty());

    let mut lex = Lexer::new("@ $", None);
    lex.set_error_notifications(true);
    while !lex.next_token().is_eof() {}

    let errors = lex.take_errors();
    let names: Vec<&str> = errors.iter().map(|error| error.get_error_name()).collect();
    assert_eq!(names, vec!["UnrecognisedToken", "UnrecognisedToken"]);
    assert_eq!(errors[1].get_location(), Location::new(1, 3));
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""abc" "a\"b" "tab\t""#, None);

    assert_eq!(tokens[0].class, TokenClass::String);
    assert_eq!(tokens[0].as_str(), r#""abc""#);
    assert_eq!(tokens[1].class, TokenClass::String);
    assert_eq!(tokens[1].as_str(), r#""a\"b""#);
    assert_eq!(tokens[2].class, TokenClass::String);
    assert_eq!(tokens[2].as_str(), r#""tab\t""#);
    assert!(tokens[3].is_eof());
}

#[test]
fn test_unterminated_string() {
    let mut lex = Lexer::new("\"open ended", None);
    lex.set_error_notifications(true);

    let token = lex.next_token();
    assert_eq!(token.class, TokenClass::Unknown);
    assert_eq!(token.as_str(), "\"open ended");

    let errors = lex.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UnterminatedString");
    assert_eq!(errors[0].get_location(), Location::new(1, 1));
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("# a comment\nfoo # trailing", None);

    assert_eq!(tokens[0].class, TokenClass::Comment);
    assert_eq!(tokens[0].as_str(), " a comment");
    assert_eq!(tokens[1].as_str(), "foo");
    assert_eq!(tokens[1].location, Location::new(2, 1));
    assert_eq!(tokens[2].class, TokenClass::Comment);
    assert_eq!(tokens[2].as_str(), " trailing");
    assert!(tokens[3].is_eof());
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = tokenize(", ( ) { } @ \\", None);

    assert!(tokens[0].is_operator(TokenKind::Comma));
    assert!(tokens[1].is_operator(TokenKind::LParen));
    assert!(tokens[2].is_operator(TokenKind::RParen));
    assert!(tokens[3].is_operator(TokenKind::LBrace));
    assert!(tokens[4].is_operator(TokenKind::RBrace));
    assert_eq!(tokens[5].class, TokenClass::Unknown);
    assert_eq!(tokens[5].as_str(), "@");
    assert_eq!(tokens[6].class, TokenClass::Unknown);
    assert_eq!(tokens[6].as_str(), "\\");
    assert!(tokens[7].is_eof());
}

#[test]
fn test_token_locations() {
    let tokens = tokenize("validate m {\n  function f", None);

    assert_eq!(tokens[0].location, Location::new(1, 1));
    assert_eq!(tokens[1].location, Location::new(1, 10));
    assert_eq!(tokens[2].location, Location::new(1, 12));
    assert_eq!(tokens[3].location, Location::new(2, 3));
    assert_eq!(tokens[4].location, Location::new(2, 12));
}

#[test]
fn test_newline_pushback_column() {
    let mut lex = Lexer::new("ab\ncd", None);

    assert_eq!(lex.next_token().as_str(), "ab");
    assert_eq!(lex.location(), Location::new(1, -1));

    let token = lex.next_token();
    assert_eq!(token.as_str(), "cd");
    assert_eq!(token.location, Location::new(2, 1));
}

#[test]
fn test_eof_is_permanent() {
    let mut lex = Lexer::new("x", None);

    assert_eq!(lex.next_token().as_str(), "x");
    for _ in 0..3 {
        let token = lex.next_token();
        assert!(token.is_eof());
        assert_eq!(token.kind(), Some(TokenKind::Eof));
    }
}

#[test]
fn test_token_display() {
    let tokens = tokenize("42 @", None);

    assert_eq!(tokens[0].to_string(), "1:1 integer ['42']");
    assert_eq!(tokens[1].to_string(), "1:4 unknown ['@'] !unknown");
}
