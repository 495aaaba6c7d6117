//! High-level business logic functions over the repository layer.
//!
//! These functions add the validation and presence checks the handlers rely
//! on, and are written against the repository traits so they work with any
//! backend. Use these in application code rather than the raw traits.

use chrono::NaiveDate;

use crate::api::{CompletedSession, Profile, ProfileId, Role, SessionId, TrainingSession};
use crate::db::models::{CompletionUpdate, NewCompletedSession, PlannedSessionUpsert, ProfilePatch};
use crate::db::repository::{
    ErrorContext, FullRepository, ProfileRepository, RepositoryError, RepositoryResult,
    SessionRepository,
};

/// Check that the storage backend is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.ping().await
}

/// Fetch a profile, failing with NotFound when absent.
pub async fn get_profile(repo: &dyn FullRepository, id: ProfileId) -> RepositoryResult<Profile> {
    repo.find_profile(id).await?.ok_or_else(|| {
        RepositoryError::not_found_with_context(
            "profile not found",
            ErrorContext::new("get_profile")
                .with_entity("profile")
                .with_entity_id(id),
        )
    })
}

/// Apply a sparse profile update.
pub async fn update_profile(
    repo: &dyn FullRepository,
    id: ProfileId,
    patch: ProfilePatch,
) -> RepositoryResult<Profile> {
    if patch.is_empty() {
        return Err(RepositoryError::validation("profile patch is empty"));
    }
    if let Some(Some(n)) = patch.sessions_per_week {
        if n == 0 || n > 14 {
            return Err(RepositoryError::validation(
                "sessions_per_week must be between 1 and 14",
            ));
        }
    }
    repo.update_profile(id, patch).await
}

/// List the athletes assigned to a coach.
pub async fn list_athletes(
    repo: &dyn FullRepository,
    coach_id: ProfileId,
) -> RepositoryResult<Vec<Profile>> {
    repo.list_athletes(coach_id).await
}

/// Write the planned content of one calendar cell.
///
/// The target profile must exist and carry the athlete role.
pub async fn upsert_planned_session(
    repo: &dyn FullRepository,
    athlete_id: ProfileId,
    date: NaiveDate,
    upsert: PlannedSessionUpsert,
) -> RepositoryResult<TrainingSession> {
    let profile = get_profile(repo, athlete_id).await?;
    if profile.role != Role::Athlete {
        return Err(RepositoryError::validation_with_context(
            "planned sessions can only be assigned to athletes",
            ErrorContext::new("upsert_planned_session")
                .with_entity("profile")
                .with_entity_id(athlete_id),
        ));
    }
    repo.upsert_planned_session(athlete_id, date, upsert).await
}

/// Fetch planned sessions within an inclusive date range.
///
/// The athlete must exist; an unknown id fails with NotFound rather than
/// returning an empty calendar.
pub async fn fetch_sessions(
    repo: &dyn FullRepository,
    athlete_id: ProfileId,
    start: NaiveDate,
    end: NaiveDate,
) -> RepositoryResult<Vec<TrainingSession>> {
    if start > end {
        return Err(RepositoryError::validation(format!(
            "invalid date range: {} > {}",
            start, end
        )));
    }
    get_profile(repo, athlete_id).await?;
    repo.fetch_sessions(athlete_id, start, end).await
}

/// Record completion data on a planned session.
pub async fn log_completion(
    repo: &dyn FullRepository,
    session_id: SessionId,
    update: CompletionUpdate,
) -> RepositoryResult<TrainingSession> {
    if let Some(minutes) = update.completed_time_minutes {
        if minutes == 0 {
            return Err(RepositoryError::validation(
                "completed time must be positive",
            ));
        }
    }
    if let Some(km) = update.completed_distance_km {
        if !(0.0..1000.0).contains(&km) {
            return Err(RepositoryError::validation(
                "completed distance out of range",
            ));
        }
    }
    repo.set_completion(session_id, update).await
}

/// Record a free-form completed session with subjective load markers.
pub async fn record_completed_session(
    repo: &dyn FullRepository,
    athlete_id: ProfileId,
    session: NewCompletedSession,
) -> RepositoryResult<CompletedSession> {
    if session.duration_min == 0 {
        return Err(RepositoryError::validation("duration must be positive"));
    }
    if !(1..=10).contains(&session.rpe) {
        return Err(RepositoryError::validation("rpe must be between 1 and 10"));
    }
    if !(1..=5).contains(&session.fatigue) {
        return Err(RepositoryError::validation(
            "fatigue must be between 1 and 5",
        ));
    }
    if !(1..=5).contains(&session.sleep_quality) {
        return Err(RepositoryError::validation(
            "sleep_quality must be between 1 and 5",
        ));
    }
    get_profile(repo, athlete_id).await?;
    repo.insert_completed_session(athlete_id, session).await
}

/// Fetch free-form completed sessions within an inclusive date range.
///
/// The athlete must exist; an unknown id fails with NotFound.
pub async fn fetch_completed_sessions(
    repo: &dyn FullRepository,
    athlete_id: ProfileId,
    start: NaiveDate,
    end: NaiveDate,
) -> RepositoryResult<Vec<CompletedSession>> {
    if start > end {
        return Err(RepositoryError::validation(format!(
            "invalid date range: {} > {}",
            start, end
        )));
    }
    get_profile(repo, athlete_id).await?;
    repo.fetch_completed_sessions(athlete_id, start, end).await
}
