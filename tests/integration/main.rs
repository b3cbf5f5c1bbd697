//! HTTP integration tests driven through the full router.

mod helpers;

mod audio_test;
mod auth_test;
mod user_test;
