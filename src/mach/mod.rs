/*!
## Rust Machine Module

This Rust module is the calculator engine. The `Runtime` owns the display,
the pending expression and the session settings, and turns each `Input`
into an `Event` for the terminal.

*/

mod base;
mod bitwise;
mod date;
mod evaluator;
mod function;
mod history;
mod operation;
mod runtime;
mod stack;
mod store;

pub use base::{convert, NumberBase};
pub use bitwise::Bitwise;
pub use date::{age, difference, parse_date, Age, DateDifference};
pub use evaluator::{evaluate, format_number, parse_float};
pub use function::{AngleMode, Function};
pub use history::{History, HistoryEntry, HISTORY_LIMIT};
pub use operation::Operation;
pub use runtime::{Event, Input, Mode, Runtime, Theme, ERROR_DELAY, ERROR_DISPLAY, MAX_DISPLAY_LEN};
pub use stack::Stack;
pub use store::{FileStore, MemoryStore, Store};
