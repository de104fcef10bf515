//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and floats)
//! - String literals with escape sequences
//! - Operators and punctuation with maximal munch
//! - Adjacency and other error cases
//! - Print/write rendering and reading tokens back

use rstest::rstest;

use crate::{errors::errors::ErrorKind, Position};

use super::{
    acceptors::default_acceptors,
    lexer::{print_tokens, read_tokens, tokenize, write_tokens},
    tokens::{Token, TokenCategory},
};

fn single(source: &str) -> Token {
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens.len(), 1, "expected one token for {:?}", source);
    tokens.into_iter().next().unwrap()
}

#[rstest]
#[case("_hello12k", "<_hello12k, identifier>")]
#[case("if_", "<if_, identifier>")]
#[case("int5", "<int5, identifier>")]
#[case("integer", "<integer, identifier>")]
#[case("returned", "<returned, identifier>")]
#[case("12.04", "<12.04, float>")]
#[case("42", "<42, integer>")]
#[case("\"hello\"", "<\"hello\", string>")]
#[case("do", "<do, keyword>")]
#[case("float", "<float, keyword>")]
#[case("return", "<return, keyword>")]
#[case(">=", "<>=, operator>")]
#[case("&&", "<&&, operator>")]
#[case("!", "<!, operator>")]
fn test_tokenize_single_token(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(single(source).to_print_string(), expected);
}

#[rstest]
#[case("1abc")]
#[case("\"hello")]
#[case("12.04.04")]
#[case("1.")]
#[case("abc\"x\"")]
#[case("\"x\"y")]
#[case("\"line\nbreak\"")]
#[case("a @ b")]
#[case("a & b")]
fn test_tokenize_rejects(#[case] source: &str) {
    let error = tokenize(source).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Lexical);
}

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("int float str for if else return while do").unwrap();

    let ids: Vec<i32> = tokens.iter().map(|token| token.id).collect();
    assert_eq!(ids, vec![100, 101, 102, 103, 104, 105, 106, 107, 108]);
    assert!(tokens
        .iter()
        .all(|token| token.category == TokenCategory::Keyword));
}

#[test]
fn test_tokenize_operators_maximal_munch() {
    let tokens = tokenize(">=").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text, ">=");
    assert_eq!(tokens[0].id, 203);

    let tokens = tokenize("**").unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(tokens.iter().all(|token| token.text == "*"));

    let tokens = tokenize("a<=b!=c").unwrap();
    let texts: Vec<&str> = tokens.iter().map(|token| token.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "<=", "b", "!=", "c"]);
}

#[test]
fn test_tokenize_punctuators() {
    let tokens = tokenize("{}").unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].category, TokenCategory::Punctuator);
    assert_eq!(tokens[0].id, 300);
    assert_eq!(tokens[1].id, 301);
}

#[test]
fn test_tokenize_string_keeps_escapes() {
    let token = single(r#""say \"hi\"\n""#);

    assert_eq!(token.category, TokenCategory::String);
    assert_eq!(token.text, r#""say \"hi\"\n""#);
}

#[test]
fn test_tokenize_declaration() {
    let tokens = tokenize("str c = 1;").unwrap();

    assert_eq!(
        print_tokens(&tokens),
        "<str, keyword>, <c, identifier>, <=, operator>, <1, integer>, <;, punctuator>"
    );
}

#[test]
fn test_second_dot_position() {
    let error = tokenize("12.04.04").unwrap_err();

    assert_eq!(*error.get_position(), Position(1, 6));
    assert!(error.to_string().contains("(at position 1:6)"));
}

#[test]
fn test_adjacency_error_position() {
    let error = tokenize("x = 1abc;").unwrap_err();

    assert_eq!(error.message(), "Invalid digit 'a' in numeric constant");
    assert_eq!(*error.get_position(), Position(1, 6));
}

#[test]
fn test_unexpected_character() {
    let error = tokenize("int a;\n  a # 1").unwrap_err();

    assert_eq!(error.message(), "Unexpected token: #");
    assert_eq!(*error.get_position(), Position(2, 5));
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("int a;\n\n  a = 10;").unwrap();

    assert_eq!(tokens[0].position, Position(1, 1));
    assert_eq!(tokens[1].position, Position(1, 5));
    assert_eq!(tokens[3].position, Position(3, 3));
    assert_eq!(tokens[5].position, Position(3, 7));
}

#[test]
fn test_empty_and_whitespace_source() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize(" \n\t  ").unwrap().is_empty());
}

#[test]
fn test_write_form() {
    let tokens = tokenize("float b = 2.5;").unwrap();

    assert_eq!(tokens[0].to_write_string(), "101 keyword float 1:1");
    assert_eq!(tokens[3].to_write_string(), "2 float 2.5 1:11");
}

#[test]
fn test_token_file_round_trip() {
    let source = "int main() {\n  str s = \"two words\";\n  s = s + \"!\";\n  return 0;\n}";
    let tokens = tokenize(source).unwrap();

    let read_back = read_tokens(&write_tokens(&tokens)).unwrap();

    assert_eq!(read_back, tokens);
}

#[test]
fn test_from_line_rejects_garbage() {
    assert!(Token::from_line("not a token").is_none());
    assert!(Token::from_line("7 widget x 1:1").is_none());
}

#[test]
fn test_acceptor_order() {
    let names: Vec<&str> = default_acceptors().iter().map(|acceptor| acceptor.name).collect();

    assert_eq!(
        names,
        vec!["number", "string", "keyword", "identifier", "operator", "punctuator"]
    );
    assert_eq!(tokenize("if ifs 1.5 \"s\" >= {").unwrap().len(), 6);
}
