//! Hosted platform integration: auth provider and object storage.
//!
//! The hosted backend owns user accounts, password storage, and recovery
//! email delivery. This module wraps its admin API behind the
//! [`AuthProvider`] trait so the service layer stays testable: production
//! uses [`HttpAuthProvider`] against the real endpoints, tests and local
//! development use [`LocalAuthProvider`].

pub mod local;

#[cfg(feature = "remote-repo")]
pub mod http;
#[cfg(feature = "remote-repo")]
pub mod storage;

pub use local::LocalAuthProvider;

#[cfg(feature = "remote-repo")]
pub use http::HttpAuthProvider;

use async_trait::async_trait;
use std::env;
use uuid::Uuid;

/// Error type for hosted platform operations.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The platform endpoint rejected the request.
    #[error("platform error (status {status}): {message}")]
    Provider { status: u16, message: String },

    /// Could not reach the platform at all.
    #[error("platform transport error: {0}")]
    Transport(String),

    /// A user with this email already exists.
    #[error("user already exists: {0}")]
    AlreadyExists(String),

    /// The referenced auth user does not exist.
    #[error("auth user not found: {0}")]
    UserNotFound(Uuid),

    /// Missing or invalid platform configuration.
    #[error("platform configuration error: {0}")]
    Configuration(String),
}

#[cfg(feature = "remote-repo")]
impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        PlatformError::Transport(err.to_string())
    }
}

/// A user account in the hosted auth system.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Privileged operations against the hosted auth system.
///
/// All methods require service-key privileges on the real platform; none of
/// them are reachable from client-side code.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create a user account with a known password.
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        email_confirmed: bool,
    ) -> Result<AuthUser, PlatformError>;

    /// Delete a user account.
    async fn delete_user(&self, auth_uid: Uuid) -> Result<(), PlatformError>;

    /// Overwrite a user's password.
    async fn set_password(&self, auth_uid: Uuid, password: &str) -> Result<(), PlatformError>;

    /// Trigger a password-recovery email.
    async fn send_recovery(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), PlatformError>;
}

/// Connection settings for the hosted platform's auth and storage APIs.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Base URL of the hosted project, without trailing slash.
    pub base_url: String,
    /// Service-role key for admin endpoints.
    pub service_key: String,
    /// Anonymous key for the public recovery endpoint.
    pub anon_key: String,
}

impl PlatformConfig {
    /// Create a new platform configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `PLATFORM_URL` (required): Base URL of the hosted project
    /// - `SERVICE_ROLE_KEY` (required): Service-role API key
    /// - `ANON_KEY` (required): Anonymous API key
    ///
    /// # Errors
    /// Returns an error if required variables are not set.
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("PLATFORM_URL")
            .map_err(|_| "PLATFORM_URL environment variable not set".to_string())?;
        let service_key = env::var("SERVICE_ROLE_KEY")
            .map_err(|_| "SERVICE_ROLE_KEY environment variable not set".to_string())?;
        let anon_key = env::var("ANON_KEY")
            .map_err(|_| "ANON_KEY environment variable not set".to_string())?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            anon_key,
        })
    }
}

/// Invitation policy settings, independent of the provider in use.
#[derive(Debug, Clone)]
pub struct InviteSettings {
    /// Public URL of the front-end, used in recovery redirects.
    pub site_url: String,
    /// Invitation token lifetime in hours.
    pub ttl_hours: i64,
}

impl Default for InviteSettings {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:3000".to_string(),
            ttl_hours: 72,
        }
    }
}

impl InviteSettings {
    /// Read invitation settings from the environment.
    ///
    /// # Environment Variables
    /// - `SITE_URL` (optional, default: http://localhost:3000)
    /// - `INVITE_TTL_HOURS` (optional, default: 72)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            site_url: env::var("SITE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.site_url),
            ttl_hours: env::var("INVITE_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|h| *h > 0)
                .unwrap_or(defaults.ttl_hours),
        }
    }

    /// Redirect target for recovery emails.
    pub fn callback_url(&self) -> String {
        format!("{}/auth/callback", self.site_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_settings_defaults() {
        let settings = InviteSettings::default();
        assert_eq!(settings.ttl_hours, 72);
        assert_eq!(settings.callback_url(), "http://localhost:3000/auth/callback");
    }
}
