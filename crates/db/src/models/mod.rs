//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` input DTOs with the defaulting rules applied on write

pub mod annotation;
pub mod heat;
pub mod log;
