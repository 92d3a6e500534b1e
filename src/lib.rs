//! # multicalc
//!
//! A calculator with standard, scientific, programmer and date modes.
//!
//! Run the executable and type keys followed by enter. Plain characters
//! are key presses and words starting with a colon are commands.
//! ```text
//! STANDARD
//!  0
//! > 2+3*4=
//! STANDARD
//!  14
//! > :prog :hex ff :not
//! PROGRAMMER HEX
//!  -100
//! BIN -100000000
//! ```
//!
//! The theme and the last ten results are saved between sessions.
//! Type `:help` for the full list of commands.

pub mod lang;
pub mod mach;
pub mod term;
