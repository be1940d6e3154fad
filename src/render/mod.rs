//! Output for the CLI: plain text for people, JSON for tools.

pub mod json;
pub mod text;

pub use json::{render_options_json, render_records_json};
pub use text::{render_options_text, render_records_text};
