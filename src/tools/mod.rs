//! Per-call tool processing: input validation and prompt building.

pub mod prompt;
pub mod validate;

pub use prompt::{build_prompt, placeholders, render};
pub use validate::{validate, ValidationError};
