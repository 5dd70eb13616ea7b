//! Log entity model and DTOs.

use heatlog_core::annotation::validate_annotation_count;
use heatlog_core::error::CoreError;
use heatlog_core::heat::validate_dimension;
use heatlog_core::log::validate_log_number;
use heatlog_core::types::{DbId, Timestamp};
use heatlog_core::validation::{reject_nul, validate_input};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::annotation::Annotation;

/// A row from the `logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Log {
    pub id: String,
    pub heat_id: DbId,
    pub log_number: i32,
    pub name: Option<String>,
    pub finished_diameter: Option<f64>,
    pub finished_length: Option<f64>,
    pub unit: String,
    pub transducer: String,
    pub calibration: String,
    pub gain: Option<f64>,
    pub prf: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A log with its annotations embedded, ascending by position.
#[derive(Debug, Clone, Serialize)]
pub struct LogWithAnnotations {
    #[serde(flatten)]
    pub log: Log,
    pub annotations: Vec<Annotation>,
}

/// Full log payload for a reconciliation.
///
/// Scalar fields replace the stored values wholesale: omitted text fields
/// become `""`, omitted numbers NULL. `annotations` is the complete new set.
/// CamelCase aliases accept payloads from older inspection clients.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReconcileLog {
    #[serde(alias = "logNumber")]
    pub log_number: Option<i32>,
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[serde(alias = "finishedDiameter")]
    pub finished_diameter: Option<f64>,
    #[serde(alias = "finishedLength")]
    pub finished_length: Option<f64>,
    #[validate(length(max = 32))]
    pub unit: Option<String>,
    #[validate(length(max = 200))]
    pub transducer: Option<String>,
    #[validate(length(max = 200))]
    pub calibration: Option<String>,
    pub gain: Option<f64>,
    pub prf: Option<f64>,
    /// Kept as raw JSON so one malformed entry can be rejected or skipped
    /// on its own instead of failing the whole request body.
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

impl ReconcileLog {
    /// Validate the scalar fields and return the log number.
    ///
    /// Annotations are checked separately since their failure handling
    /// depends on the reconciliation policy.
    pub fn validate_scalars(&self) -> Result<i32, CoreError> {
        let log_number = self
            .log_number
            .ok_or_else(|| CoreError::Validation("log_number is required".to_string()))?;
        validate_log_number(log_number)?;
        validate_input(self)?;
        for (field, value) in [
            ("name", &self.name),
            ("unit", &self.unit),
            ("transducer", &self.transducer),
            ("calibration", &self.calibration),
        ] {
            reject_nul(field, value.as_deref())?;
        }
        validate_dimension("finished_diameter", self.finished_diameter)?;
        validate_dimension("finished_length", self.finished_length)?;
        for (field, value) in [("gain", self.gain), ("prf", self.prf)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(CoreError::Validation(format!(
                    "{field} must be a finite number"
                )));
            }
        }
        validate_annotation_count(self.annotations.len())?;
        Ok(log_number)
    }
}
