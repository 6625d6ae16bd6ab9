//! Admin surface: filtered listings and direct CRUD over users, orders and
//! services, plus aggregate counts.

pub mod users;
pub mod orders;
pub mod services;
pub mod stats;
