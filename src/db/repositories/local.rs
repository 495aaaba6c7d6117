//! In-memory repository implementation.
//!
//! Backs unit tests and local development. State lives in a single
//! `RwLock`-protected store; no operation awaits while the lock is held.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::api::{
    CompletedSession, CompletedSessionId, InvitationToken, Profile, ProfileId, SessionId,
    TrainingSession,
};
use crate::db::models::{
    CompletionUpdate, NewCompletedSession, NewProfile, PlannedSessionUpsert, ProfilePatch,
};
use crate::db::repository::{
    ErrorContext, FullRepository, ProfileRepository, RepositoryError, RepositoryResult,
    SessionRepository, TokenRepository,
};

#[derive(Default)]
struct Store {
    profiles: HashMap<ProfileId, Profile>,
    sessions: HashMap<SessionId, TrainingSession>,
    completed: HashMap<CompletedSessionId, CompletedSession>,
    tokens: HashMap<String, InvitationToken>,
}

/// In-memory local repository.
#[derive(Default)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn apply_patch(profile: &mut Profile, patch: ProfilePatch) {
    if let Some(auth_uid) = patch.auth_uid {
        profile.auth_uid = Some(auth_uid);
    }
    if let Some(full_name) = patch.full_name {
        profile.full_name = full_name;
    }
    if let Some(role) = patch.role {
        profile.role = role;
    }
    if let Some(sport) = patch.sport {
        profile.sport = sport;
    }
    if let Some(coach_id) = patch.coach_id {
        profile.coach_id = coach_id;
    }
    if let Some(photo_url) = patch.photo_url {
        profile.photo_url = photo_url;
    }
    if let Some(birth_date) = patch.birth_date {
        profile.birth_date = birth_date;
    }
    if let Some(goal) = patch.goal {
        profile.goal = goal;
    }
    if let Some(races) = patch.races {
        profile.races = races;
    }
    if let Some(available_days) = patch.available_days {
        profile.available_days = available_days;
    }
    if let Some(sessions_per_week) = patch.sessions_per_week {
        profile.sessions_per_week = sessions_per_week;
    }
}

#[async_trait]
impl ProfileRepository for LocalRepository {
    async fn insert_profile(&self, profile: NewProfile) -> RepositoryResult<Profile> {
        let mut store = self.store.write();
        let email = profile.email.to_lowercase();
        if store.profiles.values().any(|p| p.email == email) {
            return Err(RepositoryError::validation_with_context(
                "profile with this email already exists",
                ErrorContext::new("insert_profile")
                    .with_entity("profile")
                    .with_details(email),
            ));
        }

        let row = Profile {
            id: ProfileId::generate(),
            auth_uid: profile.auth_uid,
            full_name: profile.full_name,
            email,
            role: profile.role,
            sport: profile.sport,
            coach_id: profile.coach_id,
            photo_url: None,
            birth_date: None,
            goal: None,
            races: vec![],
            available_days: vec![],
            sessions_per_week: None,
            created_at: Utc::now(),
        };
        store.profiles.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_profile(
        &self,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> RepositoryResult<Profile> {
        let mut store = self.store.write();
        let profile = store.profiles.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "profile not found",
                ErrorContext::new("update_profile")
                    .with_entity("profile")
                    .with_entity_id(id),
            )
        })?;
        apply_patch(profile, patch);
        Ok(profile.clone())
    }

    async fn find_profile(&self, id: ProfileId) -> RepositoryResult<Option<Profile>> {
        Ok(self.store.read().profiles.get(&id).cloned())
    }

    async fn find_profile_by_email(&self, email: &str) -> RepositoryResult<Option<Profile>> {
        let email = email.to_lowercase();
        Ok(self
            .store
            .read()
            .profiles
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn find_profile_by_auth_uid(&self, auth_uid: Uuid) -> RepositoryResult<Option<Profile>> {
        Ok(self
            .store
            .read()
            .profiles
            .values()
            .find(|p| p.auth_uid == Some(auth_uid))
            .cloned())
    }

    async fn list_athletes(&self, coach_id: ProfileId) -> RepositoryResult<Vec<Profile>> {
        let store = self.store.read();
        let mut athletes: Vec<Profile> = store
            .profiles
            .values()
            .filter(|p| p.coach_id == Some(coach_id))
            .cloned()
            .collect();
        athletes.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(athletes)
    }

    async fn delete_profile(&self, id: ProfileId) -> RepositoryResult<bool> {
        Ok(self.store.write().profiles.remove(&id).is_some())
    }
}

#[async_trait]
impl SessionRepository for LocalRepository {
    async fn upsert_planned_session(
        &self,
        athlete_id: ProfileId,
        date: NaiveDate,
        upsert: PlannedSessionUpsert,
    ) -> RepositoryResult<TrainingSession> {
        let mut store = self.store.write();

        if let Some(existing) = store
            .sessions
            .values_mut()
            .find(|s| s.athlete_id == athlete_id && s.date == date)
        {
            existing.session_type = upsert.session_type;
            existing.description = upsert.description;
            return Ok(existing.clone());
        }

        let row = TrainingSession {
            id: SessionId::generate(),
            athlete_id,
            date,
            session_type: upsert.session_type,
            description: upsert.description,
            is_completed: false,
            completed_notes: None,
            completed_time_minutes: None,
            completed_distance_km: None,
        };
        store.sessions.insert(row.id, row.clone());
        Ok(row)
    }

    async fn fetch_sessions(
        &self,
        athlete_id: ProfileId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<TrainingSession>> {
        let store = self.store.read();
        let mut sessions: Vec<TrainingSession> = store
            .sessions
            .values()
            .filter(|s| s.athlete_id == athlete_id && s.date >= start && s.date <= end)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.date);
        Ok(sessions)
    }

    async fn find_session(&self, id: SessionId) -> RepositoryResult<Option<TrainingSession>> {
        Ok(self.store.read().sessions.get(&id).cloned())
    }

    async fn set_completion(
        &self,
        id: SessionId,
        update: CompletionUpdate,
    ) -> RepositoryResult<TrainingSession> {
        let mut store = self.store.write();
        let session = store.sessions.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "training session not found",
                ErrorContext::new("set_completion")
                    .with_entity("training_session")
                    .with_entity_id(id),
            )
        })?;
        session.is_completed = true;
        session.completed_notes = update.completed_notes;
        session.completed_time_minutes = update.completed_time_minutes;
        session.completed_distance_km = update.completed_distance_km;
        Ok(session.clone())
    }

    async fn delete_sessions_for_athlete(&self, athlete_id: ProfileId) -> RepositoryResult<usize> {
        let mut store = self.store.write();
        let before = store.sessions.len();
        store.sessions.retain(|_, s| s.athlete_id != athlete_id);
        let removed = before - store.sessions.len();
        let before = store.completed.len();
        store.completed.retain(|_, s| s.athlete_id != athlete_id);
        Ok(removed + (before - store.completed.len()))
    }

    async fn insert_completed_session(
        &self,
        athlete_id: ProfileId,
        session: NewCompletedSession,
    ) -> RepositoryResult<CompletedSession> {
        let mut store = self.store.write();
        let row = CompletedSession {
            id: CompletedSessionId::generate(),
            athlete_id,
            date: session.date,
            activity: session.activity,
            duration_min: session.duration_min,
            distance_km: session.distance_km,
            rpe: session.rpe,
            fatigue: session.fatigue,
            sleep_quality: session.sleep_quality,
            comment: session.comment,
        };
        store.completed.insert(row.id, row.clone());
        Ok(row)
    }

    async fn fetch_completed_sessions(
        &self,
        athlete_id: ProfileId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<CompletedSession>> {
        let store = self.store.read();
        let mut sessions: Vec<CompletedSession> = store
            .completed
            .values()
            .filter(|s| s.athlete_id == athlete_id && s.date >= start && s.date <= end)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.date);
        Ok(sessions)
    }
}

#[async_trait]
impl TokenRepository for LocalRepository {
    async fn insert_token(&self, token: InvitationToken) -> RepositoryResult<InvitationToken> {
        let mut store = self.store.write();
        if store.tokens.contains_key(&token.token) {
            return Err(RepositoryError::validation_with_context(
                "token value already exists",
                ErrorContext::new("insert_token").with_entity("invitation_token"),
            ));
        }
        store.tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_token(&self, token: &str) -> RepositoryResult<Option<InvitationToken>> {
        Ok(self.store.read().tokens.get(token).cloned())
    }

    async fn mark_token_used(
        &self,
        token: &str,
        used_at: DateTime<Utc>,
    ) -> RepositoryResult<InvitationToken> {
        let mut store = self.store.write();
        let row = store.tokens.get_mut(token).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "invitation token not found",
                ErrorContext::new("mark_token_used").with_entity("invitation_token"),
            )
        })?;
        row.used = true;
        row.used_at = Some(used_at);
        Ok(row.clone())
    }

    async fn invalidate_tokens_for_email(&self, email: &str) -> RepositoryResult<usize> {
        let mut store = self.store.write();
        let email = email.to_lowercase();
        let now = Utc::now();
        let mut touched = 0;
        for row in store.tokens.values_mut() {
            if row.email == email && !row.used {
                row.used = true;
                row.used_at = Some(now);
                touched += 1;
            }
        }
        Ok(touched)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn ping(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
