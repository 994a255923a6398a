//! Interactive lookup mode

pub mod repl;

pub use repl::{ChatRepl, ReplCommand};
