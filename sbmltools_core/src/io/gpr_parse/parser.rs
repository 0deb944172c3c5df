use thiserror::Error;

use crate::io::gpr_parse::token::Token;
use crate::metabolic_model::gpr::Gpr;

/*
GPR Grammar:
expression -> disjunction
disjunction -> conjunction ( "OR" conjunction )* ;
conjunction -> primary ( "AND" primary )* ;
primary -> GENE | "(" expression ")" ;

e.g. ( Gene1 AND Gene2) OR Gene3
 */

static EOF: Token = Token::Eof;

/// GPR Parser
pub struct GprParser {
    /// Vector of tokens from the GPR string
    tokens: Vec<Token>,
    /// Current token being processed
    current: usize,
}

impl GprParser {
    /// Create a new GprParser, `tokens` must end with [`Token::Eof`]
    pub fn new(tokens: Vec<Token>) -> GprParser {
        GprParser { tokens, current: 0 }
    }

    // region Parsing Functions

    /// Parse the token vector into a GPR AST
    pub fn parse(&mut self) -> Result<Gpr, ParseError> {
        let gpr = self.disjunction()?;
        if !self.is_at_end() {
            // Tokens left over after a complete expression
            return Err(ParseError::EarlyTermination);
        }
        Ok(gpr)
    }

    fn disjunction(&mut self) -> Result<Gpr, ParseError> {
        let mut expr = self.conjunction()?;
        while self.match_token(&Token::Or) {
            let right = self.conjunction()?;
            expr = Gpr::or(expr, right);
        }
        Ok(expr)
    }

    fn conjunction(&mut self) -> Result<Gpr, ParseError> {
        let mut expr = self.primary()?;
        while self.match_token(&Token::And) {
            let right = self.primary()?;
            expr = Gpr::and(expr, right);
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Gpr, ParseError> {
        if let Some(identifier) = self.match_identifier() {
            return Ok(Gpr::Gene(identifier));
        }

        if self.match_token(&Token::LeftParen) {
            let expr = self.disjunction()?;
            self.consume(&Token::RightParen)?;
            return Ok(expr);
        }

        Err(ParseError::ExpectedExpression)
    }

    // endregion Parsing Functions

    // region parsing helper functions

    /// If the current token is `token`, advance past it and return true
    fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            return true;
        }
        false
    }

    /// Similar to [`GprParser::match_token`], but for an identifier token, returning the
    /// gene's string identifier
    fn match_identifier(&mut self) -> Option<String> {
        if let Token::Identifier(id) = self.peek() {
            let id = id.clone();
            self.advance();
            return Some(id);
        }
        None
    }

    /// Check whether the current token matches the provided `token`
    fn check(&self, token: &Token) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek() == token
    }

    /// Advance one position unless at the end of the token vec
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        *self.peek() == Token::Eof
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&EOF)
    }

    /// Match a required token (a closing parenthesis)
    fn consume(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.match_token(token) {
            return Ok(());
        }
        Err(ParseError::MissingToken(format!(
            "expected `{}`, found `{}`",
            token,
            self.peek()
        )))
    }

    // endregion parsing helper functions
}

/// Enum representing possible parse errors
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParseError {
    /// Missing expected token (e.g. a right parenthesis)
    #[error("Missing expected token: {0}")]
    MissingToken(String),
    /// No expression found when one was expected
    #[error("No expression found, check for a dangling operator or empty parentheses")]
    ExpectedExpression,
    /// Expression was not completed when parsing terminated
    #[error("Parsing terminated early, check for two gene identifiers without an operator")]
    EarlyTermination,
}
