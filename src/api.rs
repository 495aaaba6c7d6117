//! Public API surface for the Rust backend.
//!
//! This file consolidates the domain types shared by the repository layer,
//! the service layer, and the HTTP API. All types derive
//! Serialize/Deserialize for JSON serialization.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub Uuid);

/// Planned training session identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

/// Completed (free-form) session identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletedSessionId(pub Uuid);

impl ProfileId {
    pub fn new(value: Uuid) -> Self {
        ProfileId(value)
    }

    pub fn generate() -> Self {
        ProfileId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl SessionId {
    pub fn new(value: Uuid) -> Self {
        SessionId(value)
    }

    pub fn generate() -> Self {
        SessionId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl CompletedSessionId {
    pub fn new(value: Uuid) -> Self {
        CompletedSessionId(value)
    }

    pub fn generate() -> Self {
        CompletedSessionId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role stored on the profile row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Coach,
    Athlete,
}

/// An upcoming race the athlete is preparing for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub name: String,
    pub date: NaiveDate,
    /// Free-form distance label ("10 km", "semi", "marathon").
    pub distance: String,
}

/// User record distinguishing coach/athlete role, plus athlete metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    /// Hosted auth user id. Absent until the account has been provisioned.
    pub auth_uid: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub sport: Option<String>,
    /// Owning coach, for athlete profiles.
    #[serde(default)]
    pub coach_id: Option<ProfileId>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Season goal, free text.
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub races: Vec<Race>,
    /// Weekday names the athlete can train on.
    #[serde(default)]
    pub available_days: Vec<String>,
    #[serde(default)]
    pub sessions_per_week: Option<u8>,
    pub created_at: DateTime<Utc>,
}

/// Planned session category, coloring the calendar grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Rest,
    Endurance,
    Resistance,
    Speed,
    Vma,
    Race,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Rest => "rest",
            SessionType::Endurance => "endurance",
            SessionType::Resistance => "resistance",
            SessionType::Speed => "speed",
            SessionType::Vma => "vma",
            SessionType::Race => "race",
        }
    }
}

/// A calendar-dated planned workout entry, optionally carrying the data the
/// athlete logged when completing it.
///
/// At most one planned session exists per (athlete, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: SessionId,
    pub athlete_id: ProfileId,
    pub date: NaiveDate,
    pub session_type: SessionType,
    pub description: String,
    pub is_completed: bool,
    #[serde(default)]
    pub completed_notes: Option<String>,
    #[serde(default)]
    pub completed_time_minutes: Option<u32>,
    #[serde(default)]
    pub completed_distance_km: Option<f64>,
}

/// Activity kind for free-form completed sessions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Run,
    Bike,
    Strength,
}

/// A workout the athlete logged outside the planned grid, with subjective
/// load markers (RPE 1-10, fatigue 1-5, sleep quality 1-5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSession {
    pub id: CompletedSessionId,
    pub athlete_id: ProfileId,
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

/// A single-use, time-limited credential allowing a new athlete to set their
/// own password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationToken {
    pub token: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    #[serde(default)]
    pub used_at: Option<DateTime<Utc>>,
}

impl InvitationToken {
    /// Whether the expiry instant lies strictly in the past.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_session_type_serde_lowercase() {
        let json = serde_json::to_string(&SessionType::Vma).unwrap();
        assert_eq!(json, "\"vma\"");
        let back: SessionType = serde_json::from_str("\"endurance\"").unwrap();
        assert_eq!(back, SessionType::Endurance);
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Coach).unwrap(), "\"coach\"");
        let role: Role = serde_json::from_str("\"athlete\"").unwrap();
        assert_eq!(role, Role::Athlete);
    }

    #[test]
    fn test_token_expiry_boundary() {
        let now = Utc::now();
        let token = InvitationToken {
            token: "t".to_string(),
            email: "a@b.test".to_string(),
            created_at: now,
            expires_at: now,
            used: false,
            used_at: None,
        };
        // Exactly at expiry the token is still valid.
        assert!(!token.is_expired(now));
        assert!(token.is_expired(now + TimeDelta::seconds(1)));
        assert!(!token.is_expired(now - TimeDelta::seconds(1)));
    }

    #[test]
    fn test_profile_optional_fields_default() {
        let json = serde_json::json!({
            "id": Uuid::nil(),
            "auth_uid": null,
            "full_name": "Jean",
            "email": "jean@example.test",
            "role": "athlete",
            "created_at": "2026-01-05T00:00:00Z"
        });
        let profile: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.role, Role::Athlete);
        assert!(profile.races.is_empty());
        assert!(profile.sessions_per_week.is_none());
    }
}
