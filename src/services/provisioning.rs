//! Athlete account provisioning and removal.
//!
//! Creating an athlete spans three systems: the hosted auth user, the
//! profile row, and the invitation token. The initial password is never
//! returned to the caller; the athlete sets their own through the
//! invitation link or the recovery email.

use uuid::Uuid;

use crate::api::{Profile, ProfileId, Role};
use crate::db::models::{NewProfile, ProfilePatch};
use crate::db::repository::{FullRepository, ProfileRepository, RepositoryError, SessionRepository};
use crate::platform::{AuthProvider, InviteSettings, PlatformError};

use super::invitations;

/// Error type for provisioning flows.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Input for creating an athlete account.
#[derive(Debug, Clone)]
pub struct NewAthlete {
    pub full_name: String,
    pub email: String,
    pub sport: Option<String>,
    pub coach_id: Option<ProfileId>,
    /// Initial password. Generated when absent; never surfaced either way.
    pub password: Option<String>,
}

/// Result of a successful athlete creation.
#[derive(Debug, Clone)]
pub struct CreatedAthlete {
    pub user_id: Uuid,
    pub profile: Profile,
    pub invite: crate::api::InvitationToken,
    /// Whether the recovery email was accepted by the platform.
    pub recovery_email_sent: bool,
}

fn random_password() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    raw[..12].to_string()
}

/// Create the auth user, upsert the profile row, and issue an invitation.
///
/// A profile row may already exist for the email (pre-registered by the
/// coach); in that case it is claimed and updated rather than duplicated.
/// Recovery email failure does not fail the flow.
pub async fn create_athlete(
    repo: &dyn FullRepository,
    auth: &dyn AuthProvider,
    settings: &InviteSettings,
    athlete: NewAthlete,
) -> Result<CreatedAthlete, ProvisioningError> {
    let email = athlete.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(RepositoryError::validation("a valid email is required").into());
    }
    if athlete.full_name.trim().is_empty() {
        return Err(RepositoryError::validation("name is required").into());
    }

    let password = athlete.password.unwrap_or_else(random_password);
    let user = auth.create_user(&email, &password, true).await?;

    let profile = match repo.find_profile_by_email(&email).await? {
        Some(existing) => {
            let patch = ProfilePatch {
                auth_uid: Some(user.id),
                full_name: Some(athlete.full_name),
                role: Some(Role::Athlete),
                sport: Some(athlete.sport),
                coach_id: Some(athlete.coach_id),
                ..Default::default()
            };
            repo.update_profile(existing.id, patch).await?
        }
        None => {
            repo.insert_profile(NewProfile {
                auth_uid: Some(user.id),
                full_name: athlete.full_name,
                email: email.clone(),
                role: Role::Athlete,
                sport: athlete.sport,
                coach_id: athlete.coach_id,
            })
            .await?
        }
    };

    let invite = invitations::issue_invitation(repo, &email, settings.ttl_hours).await?;

    let recovery_email_sent = match auth.send_recovery(&email, None).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(email, error = %e, "recovery email could not be sent");
            false
        }
    };

    Ok(CreatedAthlete {
        user_id: user.id,
        profile,
        invite,
        recovery_email_sent,
    })
}

/// Delete the hosted auth user and the profile row, plus the athlete's
/// session rows.
///
/// Auth deletion failure is logged and does not block removing the profile,
/// so a half-provisioned account can always be cleaned up.
pub async fn delete_athlete(
    repo: &dyn FullRepository,
    auth: &dyn AuthProvider,
    profile_id: ProfileId,
) -> Result<(), ProvisioningError> {
    let profile = repo
        .find_profile(profile_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("profile not found"))?;

    if let Some(auth_uid) = profile.auth_uid {
        if let Err(e) = auth.delete_user(auth_uid).await {
            tracing::warn!(%auth_uid, error = %e, "auth user deletion failed");
        }
    }

    let removed = repo.delete_sessions_for_athlete(profile_id).await?;
    tracing::debug!(%profile_id, removed, "deleted athlete session rows");

    repo.delete_profile(profile_id).await?;
    Ok(())
}
