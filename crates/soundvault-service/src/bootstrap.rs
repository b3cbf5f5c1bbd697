//! Startup seeding of the default admin account.

use tracing::{info, warn};

use soundvault_core::AppResult;

use crate::user::{RegisterUser, UserService};

/// Username of the seeded admin account.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

const DEFAULT_ADMIN_PASSWORD: &str = "admin";
const DEFAULT_ADMIN_EMAIL: &str = "admin@soundvault.local";

/// Create the default admin user if no account with that username
/// exists yet. Idempotent across restarts.
pub async fn ensure_default_admin(users: &UserService) -> AppResult<()> {
    if users
        .find_live_by_username(DEFAULT_ADMIN_USERNAME)
        .await?
        .is_some()
    {
        info!(username = DEFAULT_ADMIN_USERNAME, "admin account present");
        return Ok(());
    }

    users
        .register(RegisterUser {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            full_name: "Administrator".to_string(),
        })
        .await?;
    warn!(
        username = DEFAULT_ADMIN_USERNAME,
        "default admin account created with the default password; change it"
    );
    Ok(())
}
