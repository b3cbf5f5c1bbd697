//! Static schema description for the `users` table.

use soundvault_core::types::{ColumnDef, ColumnType, TableSchema};

static USER_COLUMNS: [ColumnDef; 9] = [
    ColumnDef {
        name: "id",
        ty: ColumnType::Uuid,
        nullable: false,
        max_len: None,
        primary_key: true,
        unique: true,
        foreign_key: None,
    },
    ColumnDef {
        name: "username",
        ty: ColumnType::Text,
        nullable: false,
        max_len: Some(20),
        primary_key: false,
        unique: true,
        foreign_key: None,
    },
    ColumnDef {
        name: "email",
        ty: ColumnType::Text,
        nullable: false,
        max_len: Some(320),
        primary_key: false,
        unique: true,
        foreign_key: None,
    },
    ColumnDef {
        name: "password_hash",
        ty: ColumnType::Text,
        nullable: false,
        max_len: Some(60),
        primary_key: false,
        unique: false,
        foreign_key: None,
    },
    ColumnDef {
        name: "full_name",
        ty: ColumnType::Text,
        nullable: false,
        max_len: Some(50),
        primary_key: false,
        unique: false,
        foreign_key: None,
    },
    ColumnDef {
        name: "disabled",
        ty: ColumnType::Boolean,
        nullable: false,
        max_len: None,
        primary_key: false,
        unique: false,
        foreign_key: None,
    },
    ColumnDef {
        name: "created_at",
        ty: ColumnType::Integer,
        nullable: false,
        max_len: None,
        primary_key: false,
        unique: false,
        foreign_key: None,
    },
    ColumnDef {
        name: "updated_at",
        ty: ColumnType::Integer,
        nullable: true,
        max_len: None,
        primary_key: false,
        unique: false,
        foreign_key: None,
    },
    ColumnDef {
        name: "deleted_at",
        ty: ColumnType::Integer,
        nullable: true,
        max_len: None,
        primary_key: false,
        unique: false,
        foreign_key: None,
    },
];

/// Schema for the `users` table.
pub static USER_SCHEMA: TableSchema = TableSchema {
    table: "users",
    columns: &USER_COLUMNS,
};
