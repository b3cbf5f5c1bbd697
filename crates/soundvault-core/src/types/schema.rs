//! Static table-schema descriptions consulted by the data-access engine.
//!
//! Each entity declares its table structure once as a `static TableSchema`;
//! the engine inspects these descriptions to enforce primary-key
//! uniqueness, referential integrity, and field-level validation without
//! any per-entity code or runtime reflection.

/// The three audit columns stamped exclusively by the engine.
pub const AUDIT_COLUMNS: [&str; 3] = ["created_at", "updated_at", "deleted_at"];

/// Column data type, used for schema validation and backend row decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// UUID column.
    Uuid,
    /// Variable-length text column.
    Text,
    /// 64-bit integer column.
    Integer,
    /// Boolean column.
    Boolean,
}

/// A foreign-key reference to a parent table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyRef {
    /// The referenced parent table name.
    pub table: &'static str,
    /// The referenced parent column name.
    pub column: &'static str,
}

/// Description of a single table column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    /// Column name.
    pub name: &'static str,
    /// Column data type.
    pub ty: ColumnType,
    /// Whether NULL is a legal stored value.
    pub nullable: bool,
    /// Maximum text length, if constrained.
    pub max_len: Option<usize>,
    /// Whether this column is the primary key.
    pub primary_key: bool,
    /// Whether this column carries a uniqueness constraint.
    pub unique: bool,
    /// Foreign-key target, if this column references a parent table.
    pub foreign_key: Option<ForeignKeyRef>,
}

impl ColumnDef {
    /// Whether this column is an audit column.
    pub fn is_audit(&self) -> bool {
        AUDIT_COLUMNS.contains(&self.name)
    }
}

/// Static description of one table.
#[derive(Debug)]
pub struct TableSchema {
    /// Table name in the relational store.
    pub table: &'static str,
    /// All columns, audit columns included.
    pub columns: &'static [ColumnDef],
}

impl TableSchema {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether the table has a column with the given name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// The primary-key column, if declared.
    pub fn primary_key(&self) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// All foreign-key-bearing columns.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &'static ColumnDef> {
        self.columns.iter().filter(|c| c.foreign_key.is_some())
    }
}
