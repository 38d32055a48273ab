//! Convenience result type alias for AfriFilm.

use crate::error::AppError;

/// A specialized `Result` type for AfriFilm operations.
pub type AppResult<T> = Result<T, AppError>;
