//! JSON output envelope.
//!
//! Every JSON document printed by `titer` has the same outer shape:
//!
//! ```json
//! { "tool": "titer", "generated_at": "...", "calculation": "tcid50", "result": { ... } }
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a, T: Serialize> {
    pub tool: &'static str,
    pub generated_at: DateTime<Utc>,
    pub calculation: &'static str,
    pub result: &'a T,
}

impl<'a, T: Serialize> JsonReport<'a, T> {
    pub fn new(calculation: &'static str, result: &'a T) -> Self {
        Self {
            tool: "titer",
            generated_at: Utc::now(),
            calculation,
            result,
        }
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::new(4, format!("Failed to serialize {} result: {e}", self.calculation)))
    }
}
