//! The `Table` trait linking typed entities to their schema description.

use uuid::Uuid;

use crate::result::AppResult;
use crate::types::row::Row;
use crate::types::schema::TableSchema;

/// A typed entity backed by one relational table.
///
/// Implementations provide the static schema the engine consults for
/// integrity checks, plus lossless conversion to and from the dynamic
/// [`Row`] representation. The trait is the only per-entity code the
/// data-access engine requires.
pub trait Table: Sized + Send + Sync + 'static {
    /// The static schema description for this entity's table.
    fn schema() -> &'static TableSchema;

    /// The record's primary key.
    fn id(&self) -> Uuid;

    /// Convert the record into a full row, one value per schema column.
    fn to_row(&self) -> Row;

    /// Reconstruct the record from a full row.
    fn from_row(row: &Row) -> AppResult<Self>;
}
