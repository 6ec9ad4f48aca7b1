//! Persistent per-browser identifiers carried in a cookie.
//!
//! [`IdentifierManager`] checks a request for a valid identifier cookie and
//! issues a fresh random one, scoped to the request's registered domain, when
//! it is missing or invalid.

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod host;
pub mod http;
pub mod identifier;
pub mod random;

pub use config::{Config, IdentifierConfig};
pub use identifier::{Identifier, IdentifierManager, FAIL_ID};
