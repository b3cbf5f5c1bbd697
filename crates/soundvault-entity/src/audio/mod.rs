//! Audio file metadata entity.

pub mod model;
pub mod schema;

pub use model::AudioFile;
pub use schema::AUDIO_FILE_SCHEMA;
