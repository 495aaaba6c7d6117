//! HTTP auth provider against the hosted platform's admin API.
//!
//! Admin endpoints (`/auth/v1/admin/users`) are authenticated with the
//! service-role key; the public recovery endpoint (`/auth/v1/recover`) uses
//! the anonymous key, matching how the hosted platform scopes them.

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use uuid::Uuid;

use super::{AuthProvider, AuthUser, PlatformConfig, PlatformError};

/// Auth provider backed by the hosted platform.
pub struct HttpAuthProvider {
    client: Client,
    config: PlatformConfig,
}

impl HttpAuthProvider {
    /// Create a new provider.
    pub fn new(config: PlatformConfig) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PlatformError::Configuration(format!("http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn admin_users_url(&self) -> String {
        format!("{}/auth/v1/admin/users", self.config.base_url)
    }

    async fn check(response: Response) -> Result<Response, PlatformError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        if status.as_u16() == 422 && message.contains("already") {
            return Err(PlatformError::AlreadyExists(message));
        }
        Err(PlatformError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        email_confirmed: bool,
    ) -> Result<AuthUser, PlatformError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "email_confirm": email_confirmed,
        });
        let response = self
            .client
            .post(self.admin_users_url())
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .json(&body)
            .send()
            .await?;
        let user = Self::check(response).await?.json::<AuthUser>().await?;
        Ok(user)
    }

    async fn delete_user(&self, auth_uid: Uuid) -> Result<(), PlatformError> {
        let response = self
            .client
            .delete(format!("{}/{}", self.admin_users_url(), auth_uid))
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .send()
            .await?;
        if response.status().as_u16() == 404 {
            return Err(PlatformError::UserNotFound(auth_uid));
        }
        Self::check(response).await?;
        Ok(())
    }

    async fn set_password(&self, auth_uid: Uuid, password: &str) -> Result<(), PlatformError> {
        let body = serde_json::json!({ "password": password });
        let response = self
            .client
            .put(format!("{}/{}", self.admin_users_url(), auth_uid))
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .json(&body)
            .send()
            .await?;
        if response.status().as_u16() == 404 {
            return Err(PlatformError::UserNotFound(auth_uid));
        }
        Self::check(response).await?;
        Ok(())
    }

    async fn send_recovery(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), PlatformError> {
        let body = match redirect_to {
            Some(url) => serde_json::json!({
                "email": email,
                "options": { "redirectTo": url },
            }),
            None => serde_json::json!({ "email": email }),
        };
        let response = self
            .client
            .post(format!("{}/auth/v1/recover", self.config.base_url))
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
