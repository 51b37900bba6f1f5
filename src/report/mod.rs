//! Reporting: text rendering, methods paragraphs and the JSON envelope.

pub mod format;
pub mod json;

pub use format::*;
pub use json::*;
