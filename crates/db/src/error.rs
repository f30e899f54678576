use cuadrante_core::CoreError;

/// Failure reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport or query failure from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique key (user name, identifier, entry date) is already taken.
    #[error("Duplicate value: {0}")]
    Duplicate(String),

    /// A stored row no longer decodes into a domain value.
    #[error("Corrupt row: {0}")]
    Corrupt(#[from] CoreError),
}

/// Map PostgreSQL unique violations (SQLSTATE 23505) to [`StoreError::Duplicate`].
pub(crate) fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            tracing::debug!(constraint, "Unique constraint violated");
            return StoreError::Duplicate(format!("violates unique constraint {constraint}"));
        }
    }
    StoreError::Database(err)
}
