//! Write-side row types for repository operations.
//!
//! These mirror the shapes the handlers send to the storage layer: full rows
//! for inserts, sparse patches for updates. Patch fields use nested `Option`
//! where "absent" and "set to null" must be distinguished.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::api::{Activity, ProfileId, Role, Race, SessionType};

/// Deserialize a nullable patch field so that a present-but-null value
/// becomes `Some(None)` (clear the column) while a missing field stays
/// `None` via `#[serde(default)]` (leave the column alone).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Fields for a new profile row. The repository assigns the id and
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    pub auth_uid: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub coach_id: Option<ProfileId>,
}

/// Sparse update to a profile row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_uid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub sport: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub coach_id: Option<Option<ProfileId>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub goal: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub races: Option<Vec<Race>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_days: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub sessions_per_week: Option<Option<u8>>,
}

impl ProfilePatch {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.auth_uid.is_none()
            && self.full_name.is_none()
            && self.role.is_none()
            && self.sport.is_none()
            && self.coach_id.is_none()
            && self.photo_url.is_none()
            && self.birth_date.is_none()
            && self.goal.is_none()
            && self.races.is_none()
            && self.available_days.is_none()
            && self.sessions_per_week.is_none()
    }
}

/// Planned-session content written by the coach for one grid cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedSessionUpsert {
    pub session_type: SessionType,
    #[serde(default)]
    pub description: String,
}

/// Completion data logged by the athlete against a planned session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionUpdate {
    #[serde(default)]
    pub completed_notes: Option<String>,
    #[serde(default)]
    pub completed_time_minutes: Option<u32>,
    #[serde(default)]
    pub completed_distance_km: Option<f64>,
}


/// Fields for a new free-form completed session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompletedSession {
    pub date: NaiveDate,
    pub activity: Activity,
    pub duration_min: u32,
    #[serde(default)]
    pub distance_km: Option<f64>,
    pub rpe: u8,
    pub fatigue: u8,
    pub sleep_quality: u8,
    #[serde(default)]
    pub comment: String,
}
