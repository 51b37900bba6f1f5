//! Numeric utilities shared by the plaque and endpoint paths.

pub mod notation;

pub use notation::*;
