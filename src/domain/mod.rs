//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - endpoint assay inputs (`DilutionObservation`, `DilutionSeries`)
//! - plaque / dosing inputs (`AssayParameters`, `ReverseVolumeRequest`)
//! - results and their annotations (`Titer`, `Warning`, `*Result`)

pub mod types;

pub use types::*;
