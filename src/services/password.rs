//! Password flows tied to invitation tokens.

use crate::db::repository::{FullRepository, ProfileRepository, RepositoryError, TokenRepository};
use crate::platform::{AuthProvider, InviteSettings, PlatformError};

use super::invitations::{self, InviteError};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    TooShort,

    #[error(transparent)]
    Invite(#[from] InviteError),

    #[error("no account is linked to this invitation")]
    NoLinkedAccount,

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Set the password for the account an invitation token points at, then
/// consume the token.
///
/// The token is only marked used after the password change succeeds, so a
/// platform outage leaves the invitation reusable. Returns the email the
/// password was set for.
pub async fn set_password(
    repo: &dyn FullRepository,
    auth: &dyn AuthProvider,
    token: &str,
    password: &str,
) -> Result<String, PasswordError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(PasswordError::TooShort);
    }

    let invite = invitations::validate_invitation(repo, token).await?;

    let profile = repo
        .find_profile_by_email(&invite.email)
        .await?
        .ok_or(PasswordError::NoLinkedAccount)?;
    let auth_uid = profile.auth_uid.ok_or(PasswordError::NoLinkedAccount)?;

    auth.set_password(auth_uid, password).await?;
    repo.mark_token_used(token, chrono::Utc::now()).await?;

    tracing::info!(email = %invite.email, "password set via invitation");
    Ok(invite.email)
}

/// Re-send the recovery email for an existing account, pointing the link at
/// the app's auth callback page.
pub async fn resend_invite(
    auth: &dyn AuthProvider,
    settings: &InviteSettings,
    email: &str,
) -> Result<(), PasswordError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(RepositoryError::validation("email is required").into());
    }
    auth.send_recovery(&email, Some(&settings.callback_url()))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::platform::LocalAuthProvider;
    use crate::services::provisioning::{create_athlete, NewAthlete};

    async fn provision(repo: &LocalRepository, auth: &LocalAuthProvider) -> String {
        let created = create_athlete(
            repo,
            auth,
            &InviteSettings::default(),
            NewAthlete {
                full_name: "Marie Petit".to_string(),
                email: "m@ex.test".to_string(),
                sport: None,
                coach_id: None,
                password: None,
            },
        )
        .await
        .unwrap();
        created.invite.token
    }

    #[tokio::test]
    async fn test_set_password_consumes_token() {
        let repo = LocalRepository::new();
        let auth = LocalAuthProvider::new();
        let token = provision(&repo, &auth).await;

        let email = set_password(&repo, &auth, &token, "hunter22").await.unwrap();
        assert_eq!(email, "m@ex.test");
        assert_eq!(auth.password_of("m@ex.test").as_deref(), Some("hunter22"));

        // Token is single use.
        let err = set_password(&repo, &auth, &token, "another1").await.unwrap_err();
        assert!(matches!(err, PasswordError::Invite(InviteError::AlreadyUsed)));
    }

    #[tokio::test]
    async fn test_set_password_too_short() {
        let repo = LocalRepository::new();
        let auth = LocalAuthProvider::new();
        let token = provision(&repo, &auth).await;

        let err = set_password(&repo, &auth, &token, "abc").await.unwrap_err();
        assert!(matches!(err, PasswordError::TooShort));

        // Token still valid afterwards.
        set_password(&repo, &auth, &token, "longenough").await.unwrap();
    }

    #[tokio::test]
    async fn test_set_password_unknown_token() {
        let repo = LocalRepository::new();
        let auth = LocalAuthProvider::new();
        let err = set_password(&repo, &auth, "nope", "longenough")
            .await
            .unwrap_err();
        assert!(matches!(err, PasswordError::Invite(InviteError::NotFound)));
    }

    #[tokio::test]
    async fn test_resend_invite_uses_callback_url() {
        let repo = LocalRepository::new();
        let auth = LocalAuthProvider::new();
        provision(&repo, &auth).await;

        resend_invite(&auth, &InviteSettings::default(), "M@ex.test")
            .await
            .unwrap();

        let sent = auth.sent_recoveries();
        let last = sent.last().unwrap();
        assert_eq!(last.email, "m@ex.test");
        assert_eq!(
            last.redirect_to.as_deref(),
            Some("http://localhost:3000/auth/callback")
        );
    }
}
