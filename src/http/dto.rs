//! Data Transfer Objects for the HTTP API.
//!
//! Domain types that already derive Serialize/Deserialize are re-exported
//! and used directly as response bodies; the structs below cover request
//! envelopes and the responses that do not map one-to-one onto a domain type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export existing types that serve as wire shapes unchanged.
pub use crate::api::{CompletedSession, Profile, ProfileId, SessionId, TrainingSession};
pub use crate::db::models::{
    CompletionUpdate, NewCompletedSession, PlannedSessionUpsert, ProfilePatch,
};
pub use crate::services::{PlanDay, PlanWeek, TrainingPlan};

/// Request body for creating an athlete account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAthleteRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub coach_id: Option<ProfileId>,
    /// Initial password; generated server-side when omitted.
    #[serde(default)]
    pub password: Option<String>,
}

/// Response for athlete creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAthleteResponse {
    pub user_id: Uuid,
    pub profile: Profile,
    pub invite_token: String,
    pub invite_expires_at: DateTime<Utc>,
    pub recovery_email_sent: bool,
}

/// Request body for deleting an athlete account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAthleteRequest {
    pub profile_id: ProfileId,
}

/// Request body for re-sending the invitation recovery email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendInviteRequest {
    pub email: String,
}

/// Request body for setting a password through an invitation token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Response after a successful password set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPasswordResponse {
    pub success: bool,
    pub email: String,
}

/// Generic acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

/// Query string for invitation token validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateTokenQuery {
    pub token: String,
}

/// Response for invitation token validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    pub email: String,
}

/// Query string for athlete listing.
#[derive(Debug, Clone, Deserialize)]
pub struct AthleteListQuery {
    pub coach_id: ProfileId,
}

/// Response for athlete listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteListResponse {
    pub athletes: Vec<Profile>,
    pub total: usize,
}

/// Inclusive date range query for session listings.
#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Query string for the plan grid.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanQuery {
    /// Weeks of history shown before the current week.
    #[serde(default)]
    pub past_weeks: Option<usize>,
    /// Weeks shown from the current week forward.
    #[serde(default)]
    pub future_weeks: Option<usize>,
    /// Shifts the history block further back, in whole weeks.
    #[serde(default)]
    pub offset: Option<usize>,
}

/// Response for the health check endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
