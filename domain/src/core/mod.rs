//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: user, subject and target identities
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
