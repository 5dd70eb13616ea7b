//! Domain rules for heat, log and annotation records.
//!
//! Everything here is pure: no database or HTTP types. The `db` and `api`
//! crates call into these helpers before touching the store.

pub mod annotation;
pub mod error;
pub mod heat;
pub mod log;
pub mod types;
pub mod validation;
