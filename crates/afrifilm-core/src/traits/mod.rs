//! Core traits defined in `afrifilm-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
