//! Lex a GPR string into a series of tokens for later parsing
use thiserror::Error;

use crate::io::gpr_parse::token::Token;

pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    /// Consume the lexer, producing the token stream terminated by [`Token::Eof`]
    pub fn lex(mut self) -> Result<Vec<Token>, LexerError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }
        self.tokens.push(Token::Eof);
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), LexerError> {
        let c = self.advance();
        match c {
            '(' => self.tokens.push(Token::LeftParen),
            ')' => self.tokens.push(Token::RightParen),
            // `&` and `&&` both mean and
            '&' => {
                if self.peek() == '&' {
                    self.advance();
                }
                self.tokens.push(Token::And)
            }
            c if c.is_whitespace() => {}
            c if Lexer::is_identifier_char(c) => self.read_identifier(),
            c => {
                return Err(LexerError::InvalidCharacter {
                    character: c,
                    position: self.start,
                })
            }
        };
        Ok(())
    }

    fn read_identifier(&mut self) {
        while Lexer::is_identifier_char(self.peek()) {
            self.advance();
        }
        let text: String = self.source[self.start..self.current].iter().collect();
        let token = if text.eq_ignore_ascii_case("and") {
            Token::And
        } else if text.eq_ignore_ascii_case("or") {
            Token::Or
        } else {
            Token::Identifier(text)
        };
        self.tokens.push(token);
    }

    /// Locus tags mix letters, digits and a few separators (`At1g01010.1`, `HGNC:1234`)
    fn is_identifier_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | ':' | '\'')
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            return '\0';
        }
        self.source[self.current]
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum LexerError {
    #[error("Invalid character `{character}` at position {position}")]
    InvalidCharacter { character: char, position: usize },
}
