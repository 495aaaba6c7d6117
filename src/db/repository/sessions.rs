//! Training-session repository trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::api::{CompletedSession, ProfileId, SessionId, TrainingSession};
use crate::db::models::{CompletionUpdate, NewCompletedSession, PlannedSessionUpsert};

/// Repository trait for planned and free-form completed sessions.
///
/// Planned sessions are keyed by (athlete, date): writing to a cell that
/// already holds a session replaces its planned content and keeps the row id
/// and any completion data.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert or update the planned session for one calendar cell.
    ///
    /// A fresh row starts with `is_completed = false`.
    async fn upsert_planned_session(
        &self,
        athlete_id: ProfileId,
        date: NaiveDate,
        upsert: PlannedSessionUpsert,
    ) -> RepositoryResult<TrainingSession>;

    /// Fetch planned sessions for an athlete within an inclusive date range.
    async fn fetch_sessions(
        &self,
        athlete_id: ProfileId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<TrainingSession>>;

    /// Fetch a planned session by id.
    async fn find_session(&self, id: SessionId) -> RepositoryResult<Option<TrainingSession>>;

    /// Record completion data on a planned session and mark it completed.
    async fn set_completion(
        &self,
        id: SessionId,
        update: CompletionUpdate,
    ) -> RepositoryResult<TrainingSession>;

    /// Delete all planned sessions of an athlete. Returns rows removed.
    async fn delete_sessions_for_athlete(&self, athlete_id: ProfileId) -> RepositoryResult<usize>;

    /// Insert a free-form completed session log.
    async fn insert_completed_session(
        &self,
        athlete_id: ProfileId,
        session: NewCompletedSession,
    ) -> RepositoryResult<CompletedSession>;

    /// Fetch free-form completed sessions within an inclusive date range.
    async fn fetch_completed_sessions(
        &self,
        athlete_id: ProfileId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<CompletedSession>>;
}
