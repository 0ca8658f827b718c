//! WealthDesk Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the client dashboard backend.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod chat;
pub mod clients;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod glossary;
pub mod imports;
pub mod insights;
pub mod portfolios;
pub mod transactions;
pub mod utils;

pub use clients::ClientId;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
