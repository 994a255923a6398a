//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] — a topic + language submitted by the user
//! - [`credential::Credential`] — the gateway API key
//! - [`model::Model`] — available generative models
//! - [`error::DomainError`] — domain-level errors

pub mod credential;
pub mod error;
pub mod model;
pub mod model_config;
pub mod query;
