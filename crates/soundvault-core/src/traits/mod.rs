//! Traits defining the seams between SoundVault crates.

pub mod storage;
pub mod table;

pub use storage::ObjectStorage;
pub use table::Table;
