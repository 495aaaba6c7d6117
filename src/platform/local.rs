//! In-memory auth provider for tests and local development.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::{AuthProvider, AuthUser, PlatformError};

#[derive(Debug, Clone)]
struct LocalUser {
    email: String,
    password: String,
}

/// A recovery email the provider would have sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryRequest {
    pub email: String,
    pub redirect_to: Option<String>,
}

/// In-memory stand-in for the hosted auth system.
///
/// Recovery emails are recorded instead of sent, so tests can assert on
/// them.
#[derive(Default)]
pub struct LocalAuthProvider {
    users: RwLock<HashMap<Uuid, LocalUser>>,
    recoveries: RwLock<Vec<RecoveryRequest>>,
}

impl LocalAuthProvider {
    /// Create a new empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recovery emails recorded so far, oldest first.
    pub fn sent_recoveries(&self) -> Vec<RecoveryRequest> {
        self.recoveries.read().clone()
    }

    /// Current password of the user with this email, for test assertions.
    pub fn password_of(&self, email: &str) -> Option<String> {
        let email = email.to_lowercase();
        self.users
            .read()
            .values()
            .find(|u| u.email == email)
            .map(|u| u.password.clone())
    }

    /// Look up a user id by email.
    pub fn user_by_email(&self, email: &str) -> Option<Uuid> {
        let email = email.to_lowercase();
        self.users
            .read()
            .iter()
            .find(|(_, u)| u.email == email)
            .map(|(id, _)| *id)
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        _email_confirmed: bool,
    ) -> Result<AuthUser, PlatformError> {
        let mut users = self.users.write();
        let email = email.to_lowercase();
        if users.values().any(|u| u.email == email) {
            return Err(PlatformError::AlreadyExists(email));
        }

        let id = Uuid::new_v4();
        users.insert(
            id,
            LocalUser {
                email: email.clone(),
                password: password.to_string(),
            },
        );
        Ok(AuthUser { id, email })
    }

    async fn delete_user(&self, auth_uid: Uuid) -> Result<(), PlatformError> {
        self.users
            .write()
            .remove(&auth_uid)
            .map(|_| ())
            .ok_or(PlatformError::UserNotFound(auth_uid))
    }

    async fn set_password(&self, auth_uid: Uuid, password: &str) -> Result<(), PlatformError> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&auth_uid)
            .ok_or(PlatformError::UserNotFound(auth_uid))?;
        user.password = password.to_string();
        Ok(())
    }

    async fn send_recovery(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), PlatformError> {
        self.recoveries.write().push(RecoveryRequest {
            email: email.to_lowercase(),
            redirect_to: redirect_to.map(str::to_string),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_delete_user() {
        let provider = LocalAuthProvider::new();
        let user = provider
            .create_user("A@B.test", "secret", true)
            .await
            .unwrap();
        assert_eq!(user.email, "a@b.test");
        assert_eq!(provider.user_count(), 1);

        provider.delete_user(user.id).await.unwrap();
        assert_eq!(provider.user_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let provider = LocalAuthProvider::new();
        provider.create_user("a@b.test", "x", true).await.unwrap();
        let err = provider
            .create_user("a@b.test", "y", true)
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_set_password_unknown_user() {
        let provider = LocalAuthProvider::new();
        let err = provider
            .set_password(Uuid::new_v4(), "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_recoveries_are_recorded() {
        let provider = LocalAuthProvider::new();
        provider
            .send_recovery("a@b.test", Some("https://site/auth/callback"))
            .await
            .unwrap();
        let sent = provider.sent_recoveries();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "a@b.test");
        assert_eq!(
            sent[0].redirect_to.as_deref(),
            Some("https://site/auth/callback")
        );
    }
}
