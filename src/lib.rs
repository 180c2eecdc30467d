//! Configure factory machines with the fewest button presses

#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

pub mod error;
pub mod generate;
pub mod machine;
pub mod solve;

mod parse;
