//! Static schema description for the `audio_files` table.

use soundvault_core::types::{ColumnDef, ColumnType, ForeignKeyRef, TableSchema};

static AUDIO_FILE_COLUMNS: [ColumnDef; 9] = [
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
        name: "user_id",
        ty: ColumnType::Uuid,
        nullable: false,
        max_len: None,
        primary_key: false,
        unique: false,
        foreign_key: Some(ForeignKeyRef {
            table: "users",
            column: "id",
        }),
    },
    ColumnDef {
        name: "description",
        ty: ColumnType::Text,
        nullable: false,
        max_len: Some(100),
        primary_key: false,
        unique: false,
        foreign_key: None,
    },
    ColumnDef {
        name: "category",
        ty: ColumnType::Text,
        nullable: false,
        max_len: Some(50),
        primary_key: false,
        unique: false,
        foreign_key: None,
    },
    ColumnDef {
        name: "blob_name",
        ty: ColumnType::Uuid,
        nullable: false,
        max_len: None,
        primary_key: false,
        unique: false,
        foreign_key: None,
    },
    ColumnDef {
        name: "content_type",
        ty: ColumnType::Text,
        nullable: false,
        max_len: Some(50),
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

/// Schema for the `audio_files` table.
pub static AUDIO_FILE_SCHEMA: TableSchema = TableSchema {
    table: "audio_files",
    columns: &AUDIO_FILE_COLUMNS,
};
