//! Object-storage configuration.

use serde::{Deserialize, Serialize};

/// Blob storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider to use ("local").
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Root path for local blob storage.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Container (bucket) name blobs are stored under.
    #[serde(default = "default_container")]
    pub container: String,
    /// Public base URL signed read URLs are rooted at.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Secret key signed URLs are authenticated with.
    #[serde(default = "default_url_secret")]
    pub url_secret: String,
    /// Signed URL TTL in minutes.
    #[serde(default = "default_url_ttl")]
    pub url_ttl_minutes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            root_path: default_root_path(),
            container: default_container(),
            public_base_url: default_public_base_url(),
            url_secret: default_url_secret(),
            url_ttl_minutes: default_url_ttl(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_root_path() -> String {
    "./data/blobs".to_string()
}

fn default_container() -> String {
    "audio-files".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/blobs".to_string()
}

fn default_url_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_url_ttl() -> u64 {
    30
}
