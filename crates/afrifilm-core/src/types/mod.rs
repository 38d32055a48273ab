//! Core type definitions used across the AfriFilm workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
