//! # afrifilm-entity
//!
//! Domain entity models for AfriFilm. Every struct in this crate represents
//! a database table row or a domain value object. Row types derive
//! `sqlx::FromRow`.

pub mod content;
pub mod transaction;
pub mod user;
