//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — reasoning model used by the agents
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
