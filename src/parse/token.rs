use std::fmt;

/// The three kinds of machine segment, named by the bracket that encloses them
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bracket {
    /// `[.##.]` indicator diagram
    Square,
    /// `(0,2)` button wiring
    Round,
    /// `{3,5}` joltage requirements
    Curly,
}

impl Bracket {
    pub fn from_open(c: char) -> Option<Self> {
        match c {
            '[' => Some(Bracket::Square),
            '(' => Some(Bracket::Round),
            '{' => Some(Bracket::Curly),
            _ => None,
        }
    }

    pub fn from_close(c: char) -> Option<Self> {
        match c {
            ']' => Some(Bracket::Square),
            ')' => Some(Bracket::Round),
            '}' => Some(Bracket::Curly),
            _ => None,
        }
    }

    pub fn open(self) -> char {
        match self {
            Bracket::Square => '[',
            Bracket::Round => '(',
            Bracket::Curly => '{',
        }
    }

    pub fn close(self) -> char {
        match self {
            Bracket::Square => ']',
            Bracket::Round => ')',
            Bracket::Curly => '}',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Open(Bracket),
    Close(Bracket),
    Comma,
    /// `#` is on, `.` is off
    Light(bool),
    Number(u32),
    Space,
}

impl Token {
    pub fn number(self) -> Option<u32> {
        match self {
            Token::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn light(self) -> Option<bool> {
        match self {
            Token::Light(on) => Some(on),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open(b) => write!(f, "{}", b.open()),
            Token::Close(b) => write!(f, "{}", b.close()),
            Token::Comma => write!(f, ","),
            Token::Light(true) => write!(f, "#"),
            Token::Light(false) => write!(f, "."),
            Token::Number(n) => write!(f, "{}", n),
            Token::Space => write!(f, " "),
        }
    }
}
