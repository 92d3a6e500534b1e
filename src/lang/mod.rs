/*!
# Rust Language Module

This Rust module provides sanitizing, lexical analysis and parsing of
calculator expressions. Only digits, the decimal point, the four
arithmetic operators and parentheses survive sanitizing.

*/

#[macro_use]
mod error;
mod lex;
mod parse;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use lex::sanitize;
pub use parse::parse;
pub use token::Operator;
pub use token::Token;

pub mod ast;

pub type Column = std::ops::Range<usize>;
