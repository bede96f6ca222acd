use std::iter::FusedIterator;

use log::{debug, info};
use phf::phf_map;

use crate::error::LoxError;
use crate::token::{Token, TokenType};

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and" => TokenType::AND,
    b"class" => TokenType::CLASS,
    b"else" => TokenType::ELSE,
    b"false" => TokenType::FALSE,
    b"fun" => TokenType::FUN,
    b"for" => TokenType::FOR,
    b"if" => TokenType::IF,
    b"nil" => TokenType::NIL,
    b"or" => TokenType::OR,
    b"print" => TokenType::PRINT,
    b"return" => TokenType::RETURN,
    b"super" => TokenType::SUPER,
    b"this" => TokenType::THIS,
    b"true" => TokenType::TRUE,
    b"var" => TokenType::VAR,
    b"while" => TokenType::WHILE,
};

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a [u8],
    start: usize,
    curr_ptr: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        info!("Initializing Scanner with {} bytes", source.len());
        Self {
            source: source.as_bytes(),
            start: 0,
            curr_ptr: 0,
            line: 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Scans one lexeme.  `Ok(Some(_))` is a token kind, `Ok(None)` is
    /// skipped trivia (whitespace, newline, comment).
    fn scan_token(&mut self) -> Result<Option<TokenType>, LoxError> {
        let byte: u8 = self.advance();
        debug!(
            "Scanning token at position {}, line {}: '{}'",
            self.start, self.line, byte as char
        );

        match byte {
            b'(' => Ok(Some(TokenType::LEFT_PAREN)),

            b')' => Ok(Some(TokenType::RIGHT_PAREN)),

            b'{' => Ok(Some(TokenType::LEFT_BRACE)),

            b'}' => Ok(Some(TokenType::RIGHT_BRACE)),

            b',' => Ok(Some(TokenType::COMMA)),

            b'.' => Ok(Some(TokenType::DOT)),

            b'-' => Ok(Some(TokenType::MINUS)),

            b'+' => Ok(Some(TokenType::PLUS)),

            b';' => Ok(Some(TokenType::SEMICOLON)),

            b'*' => Ok(Some(TokenType::STAR)),

            b'!' => {
                let token_type: TokenType = if self.match_byte(b'=') {
                    TokenType::BANG_EQUAL
                } else {
                    TokenType::BANG
                };
                Ok(Some(token_type))
            }

            b'=' => {
                let token_type: TokenType = if self.match_byte(b'=') {
                    TokenType::EQUAL_EQUAL
                } else {
                    TokenType::EQUAL
                };
                Ok(Some(token_type))
            }

            b'<' => {
                let token_type: TokenType = if self.match_byte(b'=') {
                    TokenType::LESS_EQUAL
                } else {
                    TokenType::LESS
                };
                Ok(Some(token_type))
            }

            b'>' => {
                let token_type: TokenType = if self.match_byte(b'=') {
                    TokenType::GREATER_EQUAL
                } else {
                    TokenType::GREATER
                };
                Ok(Some(token_type))
            }

            b' ' | b'\r' | b'\t' => {
                debug!("Skipping whitespace");
                Ok(None)
            }

            b'\n' => {
                debug!("Incrementing line count to {}", self.line + 1);
                self.line += 1;
                Ok(None)
            }

            b'/' => {
                if self.match_byte(b'/') {
                    debug!("Found comment, skipping until newline");
                    while self.peek() != b'\n' && !self.is_at_end() {
                        self.advance();
                    }
                    Ok(None)
                } else {
                    Ok(Some(TokenType::SLASH))
                }
            }

            b'"' => {
                debug!("Starting string parsing");
                self.parse_string().map(Some)
            }

            b'0'..=b'9' => {
                debug!("Starting number parsing");
                Ok(Some(self.parse_number()))
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                debug!("Starting identifier parsing");
                Ok(Some(self.parse_identifier()))
            }

            _ => {
                debug!(
                    "Unexpected character '{}' at line {}",
                    byte as char, self.line
                );

                Err(LoxError::lex(
                    self.line,
                    format!("Unexpected character: {}", byte as char),
                ))
            }
        }
    }

    fn parse_string(&mut self) -> Result<TokenType, LoxError> {
        while !self.is_at_end() && self.peek() != b'"' {
            if self.peek() == b'\n' {
                debug!("Newline in string, incrementing line to {}", self.line + 1);
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            debug!("Unterminated string at line {}", self.line);

            return Err(LoxError::lex(self.line, "Unterminated string."));
        }

        // The closing quote.
        self.advance();

        let literal: String =
            String::from_utf8_lossy(&self.source[self.start + 1..self.curr_ptr - 1]).into_owned();

        info!("Parsed string literal: {}", literal);

        Ok(TokenType::STRING(literal))
    }

    fn parse_number(&mut self) -> TokenType {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            debug!("Found decimal point in number");

            self.advance();

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let lexeme: &str = self.lexeme();
        let number: f64 = lexeme.parse().unwrap_or(0.0);

        info!("Parsed number: {}", number);

        TokenType::NUMBER(number)
    }

    fn parse_identifier(&mut self) -> TokenType {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }

        match KEYWORDS.get(&self.source[self.start..self.curr_ptr]) {
            Some(token_type) => {
                info!("Parsed keyword: {}", self.lexeme());

                token_type.clone()
            }

            None => {
                info!("Parsed identifier: {}", self.lexeme());

                TokenType::IDENTIFIER
            }
        }
    }

    #[inline]
    fn lexeme(&self) -> &str {
        std::str::from_utf8(&self.source[self.start..self.curr_ptr]).unwrap_or_default()
    }

    #[inline]
    fn advance(&mut self) -> u8 {
        let byte = self.source[self.curr_ptr];

        self.curr_ptr += 1;

        byte
    }

    #[inline]
    fn match_byte(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.source[self.curr_ptr] != expected {
            false
        } else {
            self.curr_ptr += 1;

            true
        }
    }

    #[inline]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.source[self.curr_ptr]
        }
    }

    #[inline]
    fn peek_next(&self) -> u8 {
        if self.curr_ptr + 1 >= self.len() {
            0
        } else {
            self.source[self.curr_ptr + 1]
        }
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.curr_ptr >= self.len()
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, LoxError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.is_at_end() {
                if self.curr_ptr == self.len() {
                    self.curr_ptr += 1;

                    info!("Reached EOF at line {}", self.line);

                    return Some(Ok(Token::new(TokenType::EOF, "".to_string(), self.line)));
                }

                debug!("Iterator fully consumed");

                return None;
            }

            self.start = self.curr_ptr;

            match self.scan_token() {
                Err(e) => {
                    debug!("Scan error: {}", e);

                    return Some(Err(e));
                }

                Ok(Some(token_type)) => {
                    let lexeme: String = self.lexeme().to_string();

                    return Some(Ok(Token::new(token_type, lexeme, self.line)));
                }

                // Trivia, keep scanning.
                Ok(None) => continue,
            }
        }
    }
}

impl FusedIterator for Scanner<'_> {}
