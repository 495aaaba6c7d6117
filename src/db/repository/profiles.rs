//! Profile repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Profile, ProfileId};
use crate::db::models::{NewProfile, ProfilePatch};

/// Repository trait for profile rows.
///
/// Profiles are the single user table; the `role` column distinguishes
/// coaches from athletes. Email is unique across rows.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a new profile row and return it with assigned id.
    ///
    /// Returns a validation error if a row with the same email exists.
    async fn insert_profile(&self, profile: NewProfile) -> RepositoryResult<Profile>;

    /// Apply a sparse patch to a profile row and return the updated row.
    async fn update_profile(&self, id: ProfileId, patch: ProfilePatch)
        -> RepositoryResult<Profile>;

    /// Fetch a profile by primary key.
    async fn find_profile(&self, id: ProfileId) -> RepositoryResult<Option<Profile>>;

    /// Fetch a profile by email (unique).
    async fn find_profile_by_email(&self, email: &str) -> RepositoryResult<Option<Profile>>;

    /// Fetch a profile by hosted auth user id.
    async fn find_profile_by_auth_uid(
        &self,
        auth_uid: uuid::Uuid,
    ) -> RepositoryResult<Option<Profile>>;

    /// List athlete profiles assigned to a coach.
    async fn list_athletes(&self, coach_id: ProfileId) -> RepositoryResult<Vec<Profile>>;

    /// Delete a profile row. Returns true if a row was removed.
    async fn delete_profile(&self, id: ProfileId) -> RepositoryResult<bool>;
}
