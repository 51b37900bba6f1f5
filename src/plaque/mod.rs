//! Plaque assay calculations.
//!
//! - countability classification (`countability`)
//! - count → titer (`forward`)
//! - target dose → inoculum volume (`reverse`)

pub mod countability;
pub mod forward;
pub mod reverse;

pub use countability::*;
pub use forward::*;
pub use reverse::*;
