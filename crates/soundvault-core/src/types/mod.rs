//! Core type definitions used across the SoundVault workspace.

pub mod row;
pub mod schema;
pub mod timestamp;
pub mod value;

pub use row::Row;
pub use schema::{AUDIT_COLUMNS, ColumnDef, ColumnType, ForeignKeyRef, TableSchema};
pub use timestamp::unix_timestamp;
pub use value::Value;
