//! UI utilities for terminal output
//!
//! Progress spinners and confirmation prompts. Both write to stderr so stdout
//! carries only the result document.

mod confirm;
mod spinner;

pub use confirm::confirm_update;
pub use spinner::{create_spinner, finish_spinner};
