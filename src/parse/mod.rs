//! Parse machines from text

use crate::error::{ParseError, ParseErrorType, UNEXPECTED_END};
use crate::machine::{Button, Joltage, Machine, Manual};
use crate::parse::token::{Bracket, Token};
use crate::parse::token_iterator::TokenIterator;
use crate::solve::lights::MAX_LIGHTS;

mod token;
mod token_iterator;

/// parse a `Manual` with one machine per non-blank line
pub fn parse_manual(s: &str) -> Result<Manual, ParseError> {
    let machines = s
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_machine(line).map_err(|e| e.at_line(i + 1)))
        .collect::<Result<_, _>>()?;
    Ok(Manual::new(machines))
}

/// parse a `Machine` from a single line
pub fn parse_machine(s: &str) -> Result<Machine, ParseError> {
    let mut s = TokenIterator::new(s);
    let mut indicator = None;
    let mut buttons = Vec::new();
    let mut joltage = None;
    while let Some((i, token)) = s.next_skip_space()? {
        match token {
            Token::Open(Bracket::Square) => {
                let lights = read_indicator(&mut s, i)?;
                if indicator.replace(lights).is_some() {
                    return Err(ParseError::new(ParseErrorType::DuplicateSegment, token, i));
                }
            }
            Token::Open(Bracket::Round) => {
                let counters = read_numbers(&mut s, Bracket::Round, i)?;
                buttons.push(Button::new(counters.into_iter().map(|c| c as usize).collect()));
            }
            Token::Open(Bracket::Curly) => {
                let requirements: Vec<Joltage> = read_numbers(&mut s, Bracket::Curly, i)?;
                if joltage.replace(requirements).is_some() {
                    return Err(ParseError::new(ParseErrorType::DuplicateSegment, token, i));
                }
            }
            _ => return Err(ParseError::new(ParseErrorType::UnexpectedToken, token, i)),
        }
    }
    trace!(
        "parsed machine: {} lights, {} buttons, {} counters",
        indicator.as_ref().map_or(0, Vec::len),
        buttons.len(),
        joltage.as_ref().map_or(0, Vec::len)
    );
    Ok(Machine::new(indicator, buttons, joltage))
}

/// read lights up to and including the closing `]`
fn read_indicator(s: &mut TokenIterator<'_>, open_index: usize) -> Result<Vec<bool>, ParseError> {
    let mut lights = Vec::new();
    loop {
        let (i, token) = s.next()?.ok_or(UNEXPECTED_END)?;
        match token {
            Token::Close(Bracket::Square) => break,
            _ => {
                let on = token
                    .light()
                    .ok_or_else(|| ParseError::new(ParseErrorType::UnexpectedToken, token, i))?;
                lights.push(on);
            }
        }
    }
    if lights.is_empty() {
        return Err(ParseError::new(ParseErrorType::EmptySegment, "[]", open_index));
    }
    if lights.len() > MAX_LIGHTS {
        return Err(ParseError::new(
            ParseErrorType::IndicatorTooLong,
            lights.len(),
            open_index,
        ));
    }
    Ok(lights)
}

/// read a comma-separated list of numbers up to and including the closing bracket
fn read_numbers(
    s: &mut TokenIterator<'_>,
    bracket: Bracket,
    open_index: usize,
) -> Result<Vec<u32>, ParseError> {
    let mut numbers = Vec::new();
    loop {
        let (i, token) = s.next_skip_space()?.ok_or(UNEXPECTED_END)?;
        if token == Token::Close(bracket) && numbers.is_empty() {
            let empty = format!("{}{}", bracket.open(), bracket.close());
            return Err(ParseError::new(ParseErrorType::EmptySegment, empty, open_index));
        }
        let n = token
            .number()
            .ok_or_else(|| ParseError::new(ParseErrorType::UnexpectedToken, token, i))?;
        numbers.push(n);
        let (i, token) = s.next_skip_space()?.ok_or(UNEXPECTED_END)?;
        match token {
            Token::Comma => {}
            t if t == Token::Close(bracket) => return Ok(numbers),
            _ => return Err(ParseError::new(ParseErrorType::UnexpectedToken, token, i)),
        }
    }
}
