//! `titer-calc` library crate.
//!
//! Viral titer calculations for dilution assays:
//!
//! - plaque count → PFU/mL, with the 30–300 countability check
//! - target dose → inoculum volume
//! - endpoint dilution (Reed-Muench / Spearman-Karber) → TCID50/mL
//!
//! The binary (`titer`) is a thin wrapper around this library so the engine is
//! testable without spawning processes.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod math;
pub mod plaque;
pub mod report;

pub use app::pipeline::{calculate_forward_titer, calculate_reverse_volume, calculate_tcid50};
pub use error::{DegenerateReason, TiterError};
