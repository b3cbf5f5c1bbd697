//! # soundvault-service
//!
//! Business logic service layer for SoundVault. Each service orchestrates
//! the data-access engine, the password/token machinery, and the object
//! store to implement application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod audio;
pub mod bootstrap;
pub mod resource;
pub mod user;

pub use audio::AudioService;
pub use resource::{NoValidation, ResourceService, ValidateHook};
pub use user::{RegisterUser, UpdateUser, UserService};
