//! Order creation: active-service check, price snapshot, payment, persist, notify.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::OrderService;
