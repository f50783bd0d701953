use diesel::result::{DatabaseErrorKind, Error};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    InvalidReference(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
    #[error("Migration error: {0}")]
    MigrationError(String),
}

impl RepositoryError {
    /// Classifies a failed insert or update. Constraint violations that slipped
    /// past the pre-checks (a concurrent writer got there first) keep the same
    /// meaning the pre-checks give them.
    pub(crate) fn on_write(e: Error, conflict: &str, reference: &str) -> Self {
        match e {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                RepositoryError::Conflict(conflict.to_string())
            }
            Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                RepositoryError::InvalidReference(reference.to_string())
            }
            other => RepositoryError::DatabaseError(other),
        }
    }

    /// Classifies a failed delete: a foreign key violation means dependent rows
    /// appeared after the dependents check.
    pub(crate) fn on_delete(e: Error, entity: &str, dependents: &str) -> Self {
        match e {
            Error::NotFound => RepositoryError::NotFound(format!("{entity} not found")),
            Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                RepositoryError::Conflict(dependents.to_string())
            }
            other => RepositoryError::DatabaseError(other),
        }
    }

    pub(crate) fn on_lookup(e: Error, entity: &str) -> Self {
        match e {
            Error::NotFound => RepositoryError::NotFound(format!("{entity} not found")),
            other => RepositoryError::DatabaseError(other),
        }
    }
}
