//! Parsing of `field=value` assignments and interactive session commands.

pub mod kind;
pub mod parse;

pub use kind::Command;
pub use parse::CommandParser;
