//! # afrifilm-core
//!
//! Core crate for the AfriFilm marketplace backend. Contains the unified
//! error system, configuration schemas, pagination types, and the cache
//! provider trait.
//!
//! This crate has **no** internal dependencies on other AfriFilm crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
