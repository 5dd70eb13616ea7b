//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async data-access
//! methods. Methods that also run inside a reconciliation transaction take
//! any `PgExecutor` (a `&PgPool` or `&mut PgConnection`); the rest take
//! `&PgPool` directly.

pub mod annotation_repo;
pub mod heat_repo;
pub mod log_repo;

pub use annotation_repo::AnnotationRepo;
pub use heat_repo::HeatRepo;
pub use log_repo::LogRepo;
