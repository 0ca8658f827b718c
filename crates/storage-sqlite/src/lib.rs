//! SQLite storage implementation for WealthDesk.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `wealthdesk-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! Rows reference clients by their internal integer id. That id never leaves
//! this crate; repositories translate it to and from [`ClientId`].
//!
//! [`ClientId`]: wealthdesk_core::ClientId

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod chat;
pub mod clients;
pub mod glossary;
pub mod insights;
pub mod portfolios;
pub mod transactions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use chat::ChatRepository;
pub use clients::ClientRepository;
pub use glossary::GlossaryRepository;
pub use insights::MarketInsightRepository;
pub use portfolios::PortfolioRepository;
pub use transactions::TransactionRepository;

// Re-export from wealthdesk-core for convenience
pub use wealthdesk_core::errors::{DatabaseError, Error, Result};
