//! Errors produced while reading factory manuals

use std::fmt::{Display, Formatter};
use std::{fmt, io};

use thiserror::Error;

/// An error reading a manual from a file
#[derive(Error, Debug)]
pub enum ManualFromFileError {
    /// The file could not be read
    #[error("error reading manual file")]
    Io(#[from] io::Error),
    /// The file contents are not a valid manual
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub(crate) const UNEXPECTED_END: ParseError = ParseError::from_type(ParseErrorType::UnexpectedEnd);

/// An error parsing a machine description
#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ParseError {
    error_type: ParseErrorType,
    token: Option<String>,
    index: Option<usize>,
    line: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(error_type: ParseErrorType, token: impl Display, index: usize) -> Self {
        Self {
            error_type,
            token: Some(token.to_string()),
            index: Some(index),
            line: None,
        }
    }

    pub(crate) const fn from_type(error_type: ParseErrorType) -> Self {
        Self {
            error_type,
            token: None,
            index: None,
            line: None,
        }
    }

    /// attach the 1-based line number of the manual where the error occurred
    pub(crate) fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// The kind of error
    pub fn error_type(&self) -> &ParseErrorType {
        &self.error_type
    }

    /// The 1-based line of the manual (or machine number, once parsed)
    /// the error came from
    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

/// The kinds of `ParseError`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParseErrorType {
    /// a segment appears more than once in a machine
    DuplicateSegment,
    /// a segment has nothing between its brackets
    EmptySegment,
    /// the indicator diagram has more lights than a solver supports
    IndicatorTooLong,
    /// a character that is not part of the machine format
    InvalidToken,
    /// the machine has no indicator diagram but one is needed
    MissingIndicator,
    /// the machine has no joltage requirements but they are needed
    MissingJoltage,
    /// the input ended inside a segment
    UnexpectedEnd,
    /// a valid token in the wrong place
    UnexpectedToken,
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseErrorType::DuplicateSegment => "Duplicate segment",
            ParseErrorType::EmptySegment => "Empty segment",
            ParseErrorType::IndicatorTooLong => "Indicator diagram too long",
            ParseErrorType::InvalidToken => "Invalid token",
            ParseErrorType::MissingIndicator => "Missing indicator diagram",
            ParseErrorType::MissingJoltage => "Missing joltage requirements",
            ParseErrorType::UnexpectedEnd => "Unexpected end",
            ParseErrorType::UnexpectedToken => "Unexpected token",
        };
        write!(f, "{}", s)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_type)?;
        if let Some(token) = &self.token {
            write!(f, ": \"{}\"", token)?;
        }
        if let Some(index) = &self.index {
            write!(f, " at {}", index)?;
        }
        if let Some(line) = &self.line {
            write!(f, " (line {})", line)?;
        }
        Ok(())
    }
}
