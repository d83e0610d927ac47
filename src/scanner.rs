use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::{Error, ScanError};
use crate::literal::Literal;
use crate::token::{Location, Token, Type};

pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column_offset: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: vec!(),
            start: 0,
            current: 0,
            line: 1,
            column_offset: 0,
        }
    }

    /// Scans the source code and returns a vector of tokens.
    /// The vector always ends with a single EOF token. Lexical errors are
    /// reported as they are found and scanning continues, so one pass can
    /// surface every bad character in the source.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(
            Token::new(
                Type::EOF,
                String::from(""),
                None,
                Location::new(self.line, self.current - self.column_offset),
            )
        );

        self.tokens.clone()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        match self.source.next() {
            Some(char) => {
                self.current += 1;
                char
            },
            None => panic!("tried to advance past end of the file."),
        }
    }

    /// Returns if the character after the next one is the expected character.
    fn match_next(&mut self, expected: char) -> bool {
        self.source.peek_nth(1) == Some(&expected)
    }

    /// Returns if the scanner has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    /// Adds a new token to the list of tokens.
    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(
            Token::new(
                r#type,
                lexeme,
                literal,
                Location::new(self.line, self.start - self.column_offset),
            )
        );
    }

    /// Adds a new single char token to the list of tokens.
    fn add_single_char_token(&mut self, r#type: Type) {
        let c = self.advance();
        self.add_token(r#type, c.to_string(), None);
    }

    /// Adds a new double char token to the list of tokens.
    fn add_double_char_token(&mut self, r#type: Type) {
        let first = self.advance();
        let second = self.advance();

        self.add_token(r#type, format!("{first}{second}"), None);
    }

    /// Handles a string literal.
    fn string(&mut self) {
        // The location is pinned down before the body is consumed because a
        // string may span lines.
        let location = Location::new(self.line, self.start - self.column_offset);
        self.advance(); // Move past the starting double quote.

        let mut value = Vec::new();
        while let Some(c) = self.source.next_if(|&c| c != '"') {
            self.current += 1;

            if c == '\n' {
                self.line += 1;
                self.column_offset = self.current;
            }

            value.push(c);
        }

        if self.is_at_end() {
            ScanError {
                line: self.line,
                message: String::from("Unterminated string."),
            }.throw();
            return;
        }

        self.advance(); // Move past the closing double quote.

        let value: String = value.into_iter().collect();

        // The literal does not include the double quotes unlike the lexeme.
        self.tokens.push(
            Token::new(Type::String, format!("\"{value}\""), Some(Literal::String(value.clone())), location)
        );
    }

    /// Handles a number literal.
    fn number(&mut self) {
        let mut value = Vec::new();

        while let Some(c) = self.source.next_if(|c| c.is_ascii_digit()) {
            self.current += 1;
            value.push(c);
        }

        // A dot is part of the number only when a digit follows it.
        // Otherwise `123.` scans as a number and a dot token.
        if self.source.peek() == Some(&'.')
            && matches!(self.source.peek_nth(1), Some(c) if c.is_ascii_digit())
        {
            value.push(self.advance());

            while let Some(c) = self.source.next_if(|c| c.is_ascii_digit()) {
                self.current += 1;
                value.push(c);
            }
        }

        let value: String = value.into_iter().collect();
        let number: f64 = value.parse().expect("scanned number to be parseable");

        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    /// Handles an identifier or a keyword.
    fn identifier(&mut self) {
        let mut value = Vec::new();

        // is_alphanumeric does not include underscores.
        while let Some(c) = self.source.next_if(|c| c.is_alphanumeric() || *c == '_') {
            self.current += 1;
            value.push(c);
        }

        let value = String::from_iter(value);
        let token_type = match value.as_str() {
            "and"      => Type::And,
            "class"    => Type::Class,
            "else"     => Type::Else,
            "false"    => Type::False,
            "for"      => Type::For,
            "fun"      => Type::Fun,
            "if"       => Type::If,
            "nil"      => Type::Nil,
            "or"       => Type::Or,
            "print"    => Type::Print,
            "return"   => Type::Return,
            "super"    => Type::Super,
            "this"     => Type::This,
            "true"     => Type::True,
            "var"      => Type::Var,
            "while"    => Type::While,
            _          => Type::Identifier,
        };

        self.add_token(token_type, value, None);
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let Some(&c) = self.source.peek() else { return; };

        match c {
            // One character tokens
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),

            // Two character tokens
            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang)
                };
            },
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal)
                };
            },
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less)
                };
            },
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater)
                };
            },
            '/' => {
                if self.match_next('/') {
                    // A comment runs until the end of the line.
                    while self.source.next_if(|&c| c != '\n').is_some() {
                        self.current += 1;
                    }
                } else {
                    self.add_single_char_token(Type::Slash);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => {
                self.advance();
            },

            // Update line counter
            '\n' => {
                self.advance();

                self.line += 1;
                self.column_offset = self.current;
            },

            // String
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();

                ScanError {
                    line: self.line,
                    message: format!("Unexpected character: {c}"),
                }.throw();
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn types(source: &str) -> Vec<Type> {
        Scanner::new(source).scan_tokens().iter().map(|token| token.r#type).collect()
    }

    #[test]
    fn scan_punctuation() {
        assert_eq!(
            types("(){};,"),
            vec![
                Type::LeftParen, Type::RightParen, Type::LeftBrace, Type::RightBrace,
                Type::Semicolon, Type::Comma, Type::EOF,
            ]
        );
    }

    #[test]
    fn scan_operators() {
        assert_eq!(
            types("! != = == < <= > >= / *"),
            vec![
                Type::Bang, Type::BangEqual, Type::Equal, Type::EqualEqual,
                Type::Less, Type::LessEqual, Type::Greater, Type::GreaterEqual,
                Type::Slash, Type::Star, Type::EOF,
            ]
        );
    }

    #[test]
    fn scan_string() {
        let tokens = Scanner::new("\"hi there\"").scan_tokens();

        assert_eq!(tokens[0].r#type, Type::String);
        assert_eq!(tokens[0].lexeme, "\"hi there\"");
        assert_eq!(tokens[0].literal, Some(Literal::String(String::from("hi there"))));
    }

    #[test]
    fn scan_multiline_string_counts_lines() {
        let tokens = Scanner::new("\"a\nb\"\nfoo").scan_tokens();

        assert_eq!(tokens[0].r#type, Type::String);
        assert_eq!(tokens[0].location.line, 1);
        assert_eq!(tokens[1].r#type, Type::Identifier);
        assert_eq!(tokens[1].location.line, 3);
    }

    #[test]
    fn scan_number() {
        let tokens = Scanner::new("1234.1234").scan_tokens();

        assert_eq!(tokens[0].r#type, Type::Number);
        assert_eq!(tokens[0].lexeme, "1234.1234");
        assert_eq!(tokens[0].literal, Some(Literal::Number(1234.1234)));
    }

    #[test]
    fn scan_number_with_trailing_dot() {
        assert_eq!(types("123."), vec![Type::Number, Type::Dot, Type::EOF]);
    }

    #[test]
    fn scan_keywords_and_identifiers() {
        assert_eq!(
            types("var foo = nil; while class_"),
            vec![
                Type::Var, Type::Identifier, Type::Equal, Type::Nil, Type::Semicolon,
                Type::While, Type::Identifier, Type::EOF,
            ]
        );
    }

    #[test]
    fn scan_comment() {
        assert_eq!(types("// nothing to see here\n1"), vec![Type::Number, Type::EOF]);
    }

    #[test]
    fn tokens_on_same_line_have_unique_columns() {
        let tokens = Scanner::new("a + a").scan_tokens();

        assert_eq!(tokens[0].lexeme, tokens[2].lexeme);
        assert_ne!(tokens[0].location, tokens[2].location);
    }
}
