use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{ParseError, ParseErrorType};
use crate::parse::token::{Bracket, Token};

pub struct TokenIterator<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> TokenIterator<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            chars: s.char_indices().peekable(),
        }
    }

    pub fn next_skip_space(&mut self) -> Result<Option<(usize, Token)>, ParseError> {
        loop {
            match self.next() {
                Ok(Some((_, Token::Space))) => {}
                next => return next,
            }
        }
    }

    pub fn next(&mut self) -> Result<Option<(usize, Token)>, ParseError> {
        let (idx, c) = match self.chars.peek() {
            Some(&v) => v,
            None => return Ok(None),
        };
        let token = if c.is_whitespace() {
            while self.chars.peek().map_or(false, |&(_, c)| c.is_whitespace()) {
                self.chars.next();
            }
            Token::Space
        } else if c.is_ascii_digit() {
            let mut s = String::new();
            while let Some(&(_, c)) = self.chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                s.push(c);
                self.chars.next();
            }
            match s.parse() {
                Ok(n) => Token::Number(n),
                Err(_) => return Err(ParseError::new(ParseErrorType::InvalidToken, s, idx)),
            }
        } else {
            let token = match c {
                ',' => Token::Comma,
                '#' => Token::Light(true),
                '.' => Token::Light(false),
                c => {
                    if let Some(b) = Bracket::from_open(c) {
                        Token::Open(b)
                    } else if let Some(b) = Bracket::from_close(c) {
                        Token::Close(b)
                    } else {
                        return Err(ParseError::new(ParseErrorType::InvalidToken, c, idx));
                    }
                }
            };
            self.chars.next();
            token
        };
        Ok(Some((idx, token)))
    }
}
