//! User entity.

pub mod model;
pub mod schema;

pub use model::User;
pub use schema::USER_SCHEMA;
