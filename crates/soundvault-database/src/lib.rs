//! # soundvault-database
//!
//! PostgreSQL connection management, the pluggable storage backends, and
//! the generic schema-driven data-access engine for SoundVault.
//!
//! The [`Engine`] is the single write path for every entity: it performs
//! primary-key, referential-integrity, and field-level checks in
//! application code by consulting static [`TableSchema`] descriptions,
//! and scopes every operation to one backend transaction.
//!
//! [`TableSchema`]: soundvault_core::types::TableSchema

pub mod backend;
pub mod connection;
pub mod engine;

pub use backend::{Backend, Transaction};
pub use backend::memory::MemoryBackend;
pub use backend::postgres::PostgresBackend;
pub use connection::DatabasePool;
pub use engine::{DeleteReceipt, Engine, InsertReceipt, UpdateReceipt};
