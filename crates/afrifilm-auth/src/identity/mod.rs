//! Identity resolution: request credentials to a principal or anonymous.

pub mod principal;
pub mod resolver;

pub use principal::{Identity, Principal};
pub use resolver::{Credentials, IdentityResolver};
