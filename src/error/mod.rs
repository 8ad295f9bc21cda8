mod app_error;
mod storage_error;

pub use app_error::{AppError, storage_status};
pub use storage_error::{ErrorKind, StorageContext, StorageError, StorageResult};

pub type Result<T> = std::result::Result<T, AppError>;
