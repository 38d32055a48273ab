//! HTTP request handlers grouped by domain.

pub mod admin;
pub mod auth;
pub mod content;
pub mod creator;
pub mod health;
pub mod payment;
