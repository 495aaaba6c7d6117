//! Invitation-token lifecycle: issue, validate, consume-once, expire.
//!
//! A token is a single opaque uuid string stored with its email, creation
//! and expiry instants, and a used flag. Validation distinguishes unknown,
//! already-used, and expired tokens because the endpoints report them
//! differently.

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use crate::api::InvitationToken;
use crate::db::repository::{FullRepository, RepositoryError, RepositoryResult, TokenRepository};

/// Why an invitation token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    /// No token row with this value.
    #[error("invitation token not found")]
    NotFound,

    /// The token has already been consumed.
    #[error("invitation token already used")]
    AlreadyUsed,

    /// The token's expiry instant has passed.
    #[error("invitation token expired")]
    Expired,

    /// Storage failure while checking the token.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Issue a fresh invitation token for `email`, valid for `ttl_hours`.
///
/// Any earlier unused tokens for the same email are invalidated so only the
/// most recent invitation link works.
pub async fn issue_invitation(
    repo: &dyn FullRepository,
    email: &str,
    ttl_hours: i64,
) -> RepositoryResult<InvitationToken> {
    let superseded = repo.invalidate_tokens_for_email(email).await?;
    if superseded > 0 {
        tracing::debug!(email, superseded, "superseded earlier invitation tokens");
    }

    let now = Utc::now();
    let token = InvitationToken {
        token: Uuid::new_v4().simple().to_string(),
        email: email.to_lowercase(),
        created_at: now,
        expires_at: now + TimeDelta::hours(ttl_hours),
        used: false,
        used_at: None,
    };
    repo.insert_token(token).await
}

/// Check a token without consuming it.
pub async fn validate_invitation(
    repo: &dyn FullRepository,
    token: &str,
) -> Result<InvitationToken, InviteError> {
    let row = repo
        .find_token(token)
        .await?
        .ok_or(InviteError::NotFound)?;
    if row.used {
        return Err(InviteError::AlreadyUsed);
    }
    if row.is_expired(Utc::now()) {
        return Err(InviteError::Expired);
    }
    Ok(row)
}
