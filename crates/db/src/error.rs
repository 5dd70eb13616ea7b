use heatlog_core::error::CoreError;

/// Error for operations that mix domain checks with queries.
///
/// Plain repository methods return `sqlx::Error` directly; this type is used
/// where a call can also fail validation or a lookup (reconciliation, the
/// aggregate view).
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
