//! HTTP-level integration tests over the in-memory store.

mod admin_test;
mod auth_test;
mod content_test;
mod helpers;
mod payment_test;
