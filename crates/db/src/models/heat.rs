//! Heat entity model and DTOs.

use heatlog_core::error::CoreError;
use heatlog_core::heat::{validate_dimension, validate_heat_number};
use heatlog_core::types::{DbId, Timestamp};
use heatlog_core::validation::{reject_nul, validate_input};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `heats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Heat {
    pub id: DbId,
    pub heat_number: String,
    pub customer: String,
    pub alloy: String,
    pub diameter: Option<f64>,
    pub length: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a heat.
///
/// Omitted `customer`/`alloy` are stored as `""`; omitted dimensions as NULL.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateHeat {
    /// Missing numbers deserialize as `""` and fail the format check.
    #[serde(default)]
    pub heat_number: String,
    #[validate(length(max = 200))]
    pub customer: Option<String>,
    #[validate(length(max = 200))]
    pub alloy: Option<String>,
    pub diameter: Option<f64>,
    pub length: Option<f64>,
}

impl CreateHeat {
    /// Check the heat number format and field bounds.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        validate_heat_number(&self.heat_number)?;
        validate_input(self)?;
        reject_nul("customer", self.customer.as_deref())?;
        reject_nul("alloy", self.alloy.as_deref())?;
        validate_dimension("diameter", self.diameter)?;
        validate_dimension("length", self.length)
    }
}

/// DTO for replacing a heat's attributes. The heat number itself is immutable.
///
/// Every field is written: an omitted field resets to its default rather
/// than keeping the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateHeat {
    #[validate(length(max = 200))]
    pub customer: Option<String>,
    #[validate(length(max = 200))]
    pub alloy: Option<String>,
    pub diameter: Option<f64>,
    pub length: Option<f64>,
}

impl UpdateHeat {
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        validate_input(self)?;
        reject_nul("customer", self.customer.as_deref())?;
        reject_nul("alloy", self.alloy.as_deref())?;
        validate_dimension("diameter", self.diameter)?;
        validate_dimension("length", self.length)
    }
}
