//! Avatar bucket provisioning on the hosted object storage.
//!
//! Run once at startup: creates the public `avatars` bucket if missing and
//! enforces its size limit and MIME whitelist. Idempotent.

use reqwest::Client;
use std::time::Duration;

use super::{PlatformConfig, PlatformError};

/// Bucket holding profile photos.
pub const AVATAR_BUCKET: &str = "avatars";

/// Maximum avatar upload size in bytes (5 MB).
pub const AVATAR_SIZE_LIMIT: u64 = 5 * 1024 * 1024;

const ALLOWED_MIME_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/webp",
];

fn bucket_settings() -> serde_json::Value {
    serde_json::json!({
        "public": true,
        "file_size_limit": AVATAR_SIZE_LIMIT,
        "allowed_mime_types": ALLOWED_MIME_TYPES,
    })
}

/// Ensure the avatar bucket exists with the expected settings.
pub async fn ensure_avatar_bucket(config: &PlatformConfig) -> Result<(), PlatformError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| PlatformError::Configuration(format!("http client: {}", e)))?;

    let mut create_body = bucket_settings();
    create_body["id"] = serde_json::json!(AVATAR_BUCKET);
    create_body["name"] = serde_json::json!(AVATAR_BUCKET);

    let response = client
        .post(format!("{}/storage/v1/bucket", config.base_url))
        .header("apikey", &config.service_key)
        .bearer_auth(&config.service_key)
        .json(&create_body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        // An existing bucket is fine; settings are re-applied below.
        if !message.contains("already exists") {
            return Err(PlatformError::Provider { status, message });
        }
    }

    let response = client
        .put(format!(
            "{}/storage/v1/bucket/{}",
            config.base_url, AVATAR_BUCKET
        ))
        .header("apikey", &config.service_key)
        .bearer_auth(&config.service_key)
        .json(&bucket_settings())
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(PlatformError::Provider { status, message });
    }

    Ok(())
}
