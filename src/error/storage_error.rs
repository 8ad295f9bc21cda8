use thiserror::Error;

/// Coarse classification of a storage failure, stable across backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Conflict,
    Internal,
}

/// Storage failure tagged with the call site that produced it.
///
/// `op` is a dotted label such as `storage.postgres.product.get_product_by_id`.
/// It is attached exactly once, where the error leaves the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{op}: {what} not found")]
    NotFound { op: &'static str, what: String },

    #[error("{op}: {message}")]
    Validation { op: &'static str, message: String },

    #[error("{op}: {message}")]
    Conflict { op: &'static str, message: String },

    #[error("{op}: {source}")]
    Database {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn not_found(op: &'static str, what: impl Into<String>) -> Self {
        Self::NotFound {
            op,
            what: what.into(),
        }
    }

    pub fn conflict(op: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            op,
            message: message.into(),
        }
    }

    /// Classifies a driver error. Constraint violations become client-facing
    /// kinds, everything else stays internal.
    pub fn from_sqlx(op: &'static str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::not_found(op, "row"),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::conflict(op, db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_check_violation() || db.is_foreign_key_violation() => {
                Self::Validation {
                    op,
                    message: db.message().to_string(),
                }
            }
            _ => Self::Database { op, source: err },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Database { .. } => ErrorKind::Internal,
        }
    }

    pub fn op(&self) -> &'static str {
        match self {
            Self::NotFound { op, .. }
            | Self::Validation { op, .. }
            | Self::Conflict { op, .. }
            | Self::Database { op, .. } => op,
        }
    }
}

/// Attaches a call-site label to driver results.
pub trait StorageContext<T> {
    fn context(self, op: &'static str) -> StorageResult<T>;
}

impl<T> StorageContext<T> for std::result::Result<T, sqlx::Error> {
    fn context(self, op: &'static str) -> StorageResult<T> {
        self.map_err(|err| StorageError::from_sqlx(op, err))
    }
}
