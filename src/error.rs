use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ModelError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, ModelError::ConstraintViolation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound(_))
    }
}

/// Maps a failed insert: a unique index hit becomes `ConstraintViolation`
/// with `duplicate` as the message, a dangling foreign key becomes
/// `NotFound` with `missing`.
pub(crate) fn map_insert_error(err: DbErr, duplicate: &str, missing: &str) -> ModelError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ModelError::ConstraintViolation(duplicate.to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ModelError::NotFound(missing.to_string()),
        _ => ModelError::Database(err),
    }
}
