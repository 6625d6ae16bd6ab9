//! Registration module: identity reconciliation over a phone-keyed user table.
//!
//! Three layers as elsewhere in this crate: domain types, a repository trait
//! with sea-orm and in-memory implementations, and the business service.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::RegistrationService;
