//! Invitation-token repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::api::InvitationToken;

/// Repository trait for invitation-token rows.
///
/// Tokens are looked up by their opaque string value. Lifecycle checks
/// (unused, unexpired) live in the service layer; the repository only stores
/// and flips state.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Insert a new invitation token row.
    async fn insert_token(&self, token: InvitationToken) -> RepositoryResult<InvitationToken>;

    /// Fetch a token by its string value.
    async fn find_token(&self, token: &str) -> RepositoryResult<Option<InvitationToken>>;

    /// Mark a token used at `used_at`. Returns the updated row.
    async fn mark_token_used(
        &self,
        token: &str,
        used_at: DateTime<Utc>,
    ) -> RepositoryResult<InvitationToken>;

    /// Mark all unused tokens for an email as used. Returns rows touched.
    ///
    /// Used when a fresh invitation supersedes earlier ones.
    async fn invalidate_tokens_for_email(&self, email: &str) -> RepositoryResult<usize>;
}
