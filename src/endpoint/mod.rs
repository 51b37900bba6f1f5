//! Endpoint-dilution (TCID50) estimation.
//!
//! Responsibilities:
//!
//! - reject degenerate series and assess curve shape (`validate`)
//! - locate the 50% endpoint (`reed_muench`, `spearman_karber`)
//! - convert the endpoint to TCID50/mL and PFU/mL (`estimator`)

pub mod estimator;
pub mod reed_muench;
pub mod spearman_karber;
pub mod validate;

pub use estimator::*;
pub use reed_muench::*;
pub use spearman_karber::*;
pub use validate::*;
