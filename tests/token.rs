use rlox_lang::literal::Literal;
use rlox_lang::token::{Location, Token, Type};

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash(token: &Token) -> u64 {
    let mut hasher = DefaultHasher::new();
    token.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn create_token() {
    let token = Token::new(
        Type::LeftParen,
        "(".to_string(),
        None,
        Location::new(1, 3),
    );

    assert_eq!(token.r#type, Type::LeftParen);
    assert_eq!(token.lexeme, "(");
    assert_eq!(token.literal, None);
    assert_eq!(token.location.line, 1);
    assert_eq!(token.location.column, 3);
}

#[test]
fn create_token_from_str() {
    let token = Token::from("init");

    assert_eq!(token.r#type, Type::Identifier);
    assert_eq!(token.lexeme, "init");
    assert_eq!(token.literal, None);
    assert_eq!(token.location, Location::new(0, 0));
}

#[test]
fn display_token() {
    let token = Token::new(
        Type::Number,
        "42".to_string(),
        Some(Literal::Number(42.0)),
        Location::new(1, 3),
    );

    assert_eq!(format!("{}", token), "NUMBER 42 42.0");
}

#[test]
fn display_token_without_literal() {
    let token = Token::new(
        Type::LeftParen,
        "(".to_string(),
        None,
        Location::new(1, 3),
    );

    assert_eq!(format!("{}", token), "LEFT_PAREN ( null");
}

#[test]
fn display_eof_token() {
    let token = Token::new(Type::EOF, String::new(), None, Location::new(4, 0));

    assert_eq!(format!("{}", token), "EOF  null");
}

#[test]
fn same_hash_for_same_token() {
    assert_eq!(hash(&Token::from("init")), hash(&Token::from("init")));
}

#[test]
fn different_hash_for_different_name() {
    assert_ne!(hash(&Token::from("init")), hash(&Token::from("init2")));
}

#[test]
fn different_hash_for_different_location() {
    // Two uses of the same name in different places must act as different
    // keys in the resolver's side table.
    let token = Token::new(
        Type::Identifier,
        "a".to_string(),
        None,
        Location::new(1, 3),
    );
    let token_copy = Token::new(
        Type::Identifier,
        "a".to_string(),
        None,
        Location::new(1, 7),
    );

    assert_ne!(hash(&token), hash(&token_copy));
}
