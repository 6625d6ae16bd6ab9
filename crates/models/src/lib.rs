pub mod errors;
pub mod db;
pub mod user;
pub mod service;
pub mod order;

#[cfg(test)]
mod tests;
