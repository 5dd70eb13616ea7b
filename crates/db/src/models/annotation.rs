//! Annotation entity model and DTOs.

use heatlog_core::annotation::{
    validate_annotation_type, validate_position, MAX_PROVENANCE_LENGTH,
};
use heatlog_core::error::CoreError;
use heatlog_core::heat::validate_dimension;
use heatlog_core::types::{DbId, Timestamp};
use heatlog_core::validation::{reject_nul, validate_input};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `annotations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Annotation {
    pub id: DbId,
    pub log_id: String,
    pub position: f64,
    #[serde(rename = "type")]
    pub annotation_type: String,
    pub note: Option<String>,
    pub comment: Option<String>,
    pub depth: Option<f64>,
    pub hash: Option<String>,
    pub inspector: Option<String>,
    pub user_name: Option<String>,
    pub user_role: Option<String>,
    pub user_color: Option<String>,
    pub created_at: Timestamp,
}

/// The annotating user, as sent by inspection clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotationUser {
    pub name: Option<String>,
    pub role: Option<String>,
    pub color: Option<String>,
}

/// One annotation as submitted by a client.
///
/// `position` and `type` are optional at the serde level so that a missing
/// value surfaces as a validation failure for this entry alone.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AnnotationInput {
    pub position: Option<f64>,
    #[serde(rename = "type")]
    pub annotation_type: Option<String>,
    #[validate(length(max = 2000))]
    pub note: Option<String>,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
    pub depth: Option<f64>,
    #[validate(length(max = 200))]
    pub hash: Option<String>,
    #[validate(length(max = 200))]
    pub inspector: Option<String>,
    pub user: Option<AnnotationUser>,
}

/// A validated annotation, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnnotation {
    pub position: f64,
    pub annotation_type: String,
    pub note: Option<String>,
    pub comment: Option<String>,
    pub depth: Option<f64>,
    pub hash: Option<String>,
    pub inspector: Option<String>,
    pub user_name: Option<String>,
    pub user_role: Option<String>,
    pub user_color: Option<String>,
}

impl AnnotationInput {
    /// Parse one raw list entry. Malformed JSON becomes a validation error.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CoreError> {
        serde_json::from_value(value)
            .map_err(|e| CoreError::Validation(format!("malformed annotation: {e}")))
    }

    /// Validate every field and produce an insertable annotation.
    pub fn into_new(self) -> Result<NewAnnotation, CoreError> {
        validate_input(&self)?;
        let position = validate_position(self.position)?;
        let annotation_type = validate_annotation_type(self.annotation_type.as_deref())?.to_string();
        validate_dimension("depth", self.depth)?;
        for (field, value) in [
            ("note", &self.note),
            ("comment", &self.comment),
            ("hash", &self.hash),
            ("inspector", &self.inspector),
        ] {
            reject_nul(field, value.as_deref())?;
        }

        let user = self.user.unwrap_or_default();
        for (field, value) in [
            ("user.name", &user.name),
            ("user.role", &user.role),
            ("user.color", &user.color),
        ] {
            reject_nul(field, value.as_deref())?;
            if value.as_ref().is_some_and(|v| v.len() > MAX_PROVENANCE_LENGTH) {
                return Err(CoreError::Validation(format!(
                    "{field} exceeds maximum length of {MAX_PROVENANCE_LENGTH} characters"
                )));
            }
        }

        Ok(NewAnnotation {
            position,
            annotation_type,
            note: self.note,
            comment: self.comment,
            depth: self.depth,
            hash: self.hash,
            inspector: self.inspector,
            user_name: user.name,
            user_role: user.role,
            user_color: user.color,
        })
    }
}

/// DTO for `POST /api/annotations`: a single annotation bound to a log.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotation {
    #[serde(default)]
    pub log_id: String,
    #[serde(flatten)]
    pub annotation: AnnotationInput,
}
