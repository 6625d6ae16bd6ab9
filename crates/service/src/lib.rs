//! Business layer on top of `models`.
//! - Identity reconciliation and order creation behind repository traits.
//! - Admin listings and CRUD as plain functions over a connection.
//! - Errors are `ServiceError`; mapping to HTTP happens in the server crate.

pub mod errors;
pub mod pagination;
pub mod patch;
pub mod integrations;
pub mod registration;
pub mod ordering;
pub mod catalog;
pub mod admin;
#[cfg(test)]
pub mod test_support;
