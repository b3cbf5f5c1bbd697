//! Current-time source for audit stamps.

use chrono::Utc;

/// The current time as whole seconds since the Unix epoch.
///
/// Every audit field (`created_at`, `updated_at`, `deleted_at`) and token
/// expiry in the system is stamped from this single function.
pub fn unix_timestamp() -> i64 {
    Utc::now().timestamp()
}
