//! Tokens of a gene association sub-expression
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub enum Token {
    /// A locus tag or other gene identifier, kept exactly as written
    Identifier(String),
    /// `and` in any case, `&` or `&&`
    And,
    /// `or` in any case
    Or,
    LeftParen,
    RightParen,
    Eof,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Identifier(id) => write!(f, "{}", id),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Eof => write!(f, "end of expression"),
        }
    }
}
