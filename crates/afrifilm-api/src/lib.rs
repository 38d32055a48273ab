//! # afrifilm-api
//!
//! HTTP API layer for AfriFilm built on Axum.
//!
//! Provides the REST endpoints, identity extractors, DTOs, error mapping,
//! and the CORS, compression and request logging layers.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{bootstrap, build_app, run_server};
pub use error::ApiError;
pub use state::{AppState, Stores};
