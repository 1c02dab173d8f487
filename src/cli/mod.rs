//! Interactive shell for the file manager.
//!
//! ## Architecture
//!
//! - `command.rs` - closed set of commands and the line parser
//! - `repl.rs` - prompt/read/dispatch/print loop
//!
//! The shell holds no filesystem logic: it parses a line into a
//! [`Command`], hands it to the [`FileManager`](crate::domains::fs::FileManager),
//! and prints whatever comes back.

mod command;
mod repl;

pub use command::{Command, ParseError};
pub use repl::run;
