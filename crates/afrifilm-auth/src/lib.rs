//! # afrifilm-auth
//!
//! Authentication and authorization for AfriFilm.
//!
//! ## Modules
//!
//! - `jwt`: JWT token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `identity`: Resolves request credentials to a principal or anonymous
//! - `rbac`: Role-based access control enforcement

pub mod identity;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use identity::{Credentials, Identity, IdentityResolver, Principal};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{RbacEnforcer, RbacPolicies, SystemPermission};
