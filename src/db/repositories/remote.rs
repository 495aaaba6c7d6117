//! Hosted backend repository implementation.
//!
//! Rows live in the hosted platform's Postgres and are reached through its
//! row-level REST API (PostgREST conventions): column filters as
//! `?col=eq.value` query parameters, the service key in both the `apikey`
//! header and the bearer token, and `Prefer: return=representation` to get
//! written rows back.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use uuid::Uuid;

use crate::api::{CompletedSession, InvitationToken, Profile, ProfileId, SessionId, TrainingSession};
use crate::db::models::{
    CompletionUpdate, NewCompletedSession, NewProfile, PlannedSessionUpsert, ProfilePatch,
};
use crate::db::repository::{
    ErrorContext, FullRepository, ProfileRepository, RepositoryError, RepositoryResult,
    SessionRepository, TokenRepository,
};

const PROFILES: &str = "profiles";
const SESSIONS: &str = "training_sessions";
const COMPLETED: &str = "completed_sessions";
const TOKENS: &str = "invitation_tokens";

/// Connection settings for the hosted row API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the hosted project, without trailing slash.
    pub base_url: String,
    /// Service-role key (bypasses row-level security; server side only).
    pub service_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Create a new remote configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `PLATFORM_URL` (required): Base URL of the hosted project
    /// - `SERVICE_ROLE_KEY` (required): Service-role API key
    /// - `PLATFORM_TIMEOUT_SECS` (optional, default: 30)
    ///
    /// # Errors
    /// Returns an error if required variables are not set.
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("PLATFORM_URL")
            .map_err(|_| "PLATFORM_URL environment variable not set".to_string())?;
        let service_key = env::var("SERVICE_ROLE_KEY")
            .map_err(|_| "SERVICE_ROLE_KEY environment variable not set".to_string())?;
        let timeout_secs = env::var("PLATFORM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            timeout_secs,
        })
    }
}

/// Repository over the hosted backend's row-level REST API.
pub struct RemoteRepository {
    client: Client,
    config: RemoteConfig,
}

impl RemoteRepository {
    /// Create a new remote repository.
    pub fn new(config: RemoteConfig) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(HeaderMap::new())
            .build()
            .map_err(|e| RepositoryError::configuration(format!("http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }

    /// Run a request and decode the row array the REST API returns.
    async fn rows<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &str,
        entity: &str,
    ) -> RepositoryResult<Vec<T>> {
        let response = self.authed(builder).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Vec<T>>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let context = ErrorContext::new(operation)
            .with_entity(entity)
            .with_details(format!("status={} body={}", status, body));
        match status {
            StatusCode::CONFLICT => Err(RepositoryError::validation_with_context(
                "row conflicts with existing data",
                context,
            )),
            StatusCode::NOT_FOUND => Err(RepositoryError::not_found_with_context(
                "row endpoint not found",
                context,
            )),
            s if s.is_server_error() => Err(RepositoryError::connection_with_context(
                "hosted backend error",
                context,
            )),
            _ => Err(RepositoryError::query_with_context(
                "hosted backend rejected request",
                context,
            )),
        }
    }

    /// Like [`rows`], but expect exactly one written row back.
    async fn single_row<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &str,
        entity: &str,
    ) -> RepositoryResult<T> {
        let mut rows: Vec<T> = self
            .rows(builder.header("Prefer", "return=representation"), operation, entity)
            .await?;
        if rows.is_empty() {
            return Err(RepositoryError::not_found_with_context(
                "write matched no rows",
                ErrorContext::new(operation).with_entity(entity),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    fn eq(value: impl ToString) -> String {
        format!("eq.{}", value.to_string())
    }
}

#[async_trait]
impl ProfileRepository for RemoteRepository {
    async fn insert_profile(&self, profile: NewProfile) -> RepositoryResult<Profile> {
        let body = serde_json::json!({
            "auth_uid": profile.auth_uid,
            "full_name": profile.full_name,
            "email": profile.email.to_lowercase(),
            "role": profile.role,
            "sport": profile.sport,
            "coach_id": profile.coach_id,
        });
        self.single_row(
            self.client.post(self.table_url(PROFILES)).json(&body),
            "insert_profile",
            "profile",
        )
        .await
    }

    async fn update_profile(
        &self,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> RepositoryResult<Profile> {
        self.single_row(
            self.client
                .patch(self.table_url(PROFILES))
                .query(&[("id", Self::eq(id.value()))])
                .json(&patch),
            "update_profile",
            "profile",
        )
        .await
    }

    async fn find_profile(&self, id: ProfileId) -> RepositoryResult<Option<Profile>> {
        let mut rows: Vec<Profile> = self
            .rows(
                self.client
                    .get(self.table_url(PROFILES))
                    .query(&[("id", Self::eq(id.value())), ("select", "*".to_string())]),
                "find_profile",
                "profile",
            )
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn find_profile_by_email(&self, email: &str) -> RepositoryResult<Option<Profile>> {
        let mut rows: Vec<Profile> = self
            .rows(
                self.client.get(self.table_url(PROFILES)).query(&[
                    ("email", Self::eq(email.to_lowercase())),
                    ("select", "*".to_string()),
                ]),
                "find_profile_by_email",
                "profile",
            )
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn find_profile_by_auth_uid(&self, auth_uid: Uuid) -> RepositoryResult<Option<Profile>> {
        let mut rows: Vec<Profile> = self
            .rows(
                self.client.get(self.table_url(PROFILES)).query(&[
                    ("auth_uid", Self::eq(auth_uid)),
                    ("select", "*".to_string()),
                ]),
                "find_profile_by_auth_uid",
                "profile",
            )
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn list_athletes(&self, coach_id: ProfileId) -> RepositoryResult<Vec<Profile>> {
        self.rows(
            self.client.get(self.table_url(PROFILES)).query(&[
                ("coach_id", Self::eq(coach_id.value())),
                ("role", Self::eq("athlete")),
                ("select", "*".to_string()),
                ("order", "full_name.asc".to_string()),
            ]),
            "list_athletes",
            "profile",
        )
        .await
    }

    async fn delete_profile(&self, id: ProfileId) -> RepositoryResult<bool> {
        let rows: Vec<Profile> = self
            .rows(
                self.client
                    .delete(self.table_url(PROFILES))
                    .query(&[("id", Self::eq(id.value()))])
                    .header("Prefer", "return=representation"),
                "delete_profile",
                "profile",
            )
            .await?;
        Ok(!rows.is_empty())
    }
}

#[async_trait]
impl SessionRepository for RemoteRepository {
    async fn upsert_planned_session(
        &self,
        athlete_id: ProfileId,
        date: NaiveDate,
        upsert: PlannedSessionUpsert,
    ) -> RepositoryResult<TrainingSession> {
        // Select-then-write, as the coach grid does: a PATCH must not clear
        // completion data already logged on the row.
        let existing: Vec<TrainingSession> = self
            .rows(
                self.client.get(self.table_url(SESSIONS)).query(&[
                    ("athlete_id", Self::eq(athlete_id.value())),
                    ("date", Self::eq(date.format("%Y-%m-%d"))),
                    ("select", "*".to_string()),
                ]),
                "upsert_planned_session",
                "training_session",
            )
            .await?;

        if let Some(row) = existing.first() {
            let body = serde_json::json!({
                "session_type": upsert.session_type,
                "description": upsert.description,
            });
            return self
                .single_row(
                    self.client
                        .patch(self.table_url(SESSIONS))
                        .query(&[("id", Self::eq(row.id.value()))])
                        .json(&body),
                    "upsert_planned_session",
                    "training_session",
                )
                .await;
        }

        let body = serde_json::json!({
            "athlete_id": athlete_id,
            "date": date,
            "session_type": upsert.session_type,
            "description": upsert.description,
            "is_completed": false,
        });
        self.single_row(
            self.client.post(self.table_url(SESSIONS)).json(&body),
            "upsert_planned_session",
            "training_session",
        )
        .await
    }

    async fn fetch_sessions(
        &self,
        athlete_id: ProfileId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<TrainingSession>> {
        self.rows(
            self.client.get(self.table_url(SESSIONS)).query(&[
                ("athlete_id", Self::eq(athlete_id.value())),
                ("date", format!("gte.{}", start.format("%Y-%m-%d"))),
                ("date", format!("lte.{}", end.format("%Y-%m-%d"))),
                ("select", "*".to_string()),
                ("order", "date.asc".to_string()),
            ]),
            "fetch_sessions",
            "training_session",
        )
        .await
    }

    async fn find_session(&self, id: SessionId) -> RepositoryResult<Option<TrainingSession>> {
        let mut rows: Vec<TrainingSession> = self
            .rows(
                self.client
                    .get(self.table_url(SESSIONS))
                    .query(&[("id", Self::eq(id.value())), ("select", "*".to_string())]),
                "find_session",
                "training_session",
            )
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn set_completion(
        &self,
        id: SessionId,
        update: CompletionUpdate,
    ) -> RepositoryResult<TrainingSession> {
        let body = serde_json::json!({
            "is_completed": true,
            "completed_notes": update.completed_notes,
            "completed_time_minutes": update.completed_time_minutes,
            "completed_distance_km": update.completed_distance_km,
        });
        self.single_row(
            self.client
                .patch(self.table_url(SESSIONS))
                .query(&[("id", Self::eq(id.value()))])
                .json(&body),
            "set_completion",
            "training_session",
        )
        .await
    }

    async fn delete_sessions_for_athlete(&self, athlete_id: ProfileId) -> RepositoryResult<usize> {
        let planned: Vec<TrainingSession> = self
            .rows(
                self.client
                    .delete(self.table_url(SESSIONS))
                    .query(&[("athlete_id", Self::eq(athlete_id.value()))])
                    .header("Prefer", "return=representation"),
                "delete_sessions_for_athlete",
                "training_session",
            )
            .await?;
        let completed: Vec<CompletedSession> = self
            .rows(
                self.client
                    .delete(self.table_url(COMPLETED))
                    .query(&[("athlete_id", Self::eq(athlete_id.value()))])
                    .header("Prefer", "return=representation"),
                "delete_sessions_for_athlete",
                "completed_session",
            )
            .await?;
        Ok(planned.len() + completed.len())
    }

    async fn insert_completed_session(
        &self,
        athlete_id: ProfileId,
        session: NewCompletedSession,
    ) -> RepositoryResult<CompletedSession> {
        let body = serde_json::json!({
            "athlete_id": athlete_id,
            "date": session.date,
            "activity": session.activity,
            "duration_min": session.duration_min,
            "distance_km": session.distance_km,
            "rpe": session.rpe,
            "fatigue": session.fatigue,
            "sleep_quality": session.sleep_quality,
            "comment": session.comment,
        });
        self.single_row(
            self.client.post(self.table_url(COMPLETED)).json(&body),
            "insert_completed_session",
            "completed_session",
        )
        .await
    }

    async fn fetch_completed_sessions(
        &self,
        athlete_id: ProfileId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<CompletedSession>> {
        self.rows(
            self.client.get(self.table_url(COMPLETED)).query(&[
                ("athlete_id", Self::eq(athlete_id.value())),
                ("date", format!("gte.{}", start.format("%Y-%m-%d"))),
                ("date", format!("lte.{}", end.format("%Y-%m-%d"))),
                ("select", "*".to_string()),
                ("order", "date.asc".to_string()),
            ]),
            "fetch_completed_sessions",
            "completed_session",
        )
        .await
    }
}

#[async_trait]
impl TokenRepository for RemoteRepository {
    async fn insert_token(&self, token: InvitationToken) -> RepositoryResult<InvitationToken> {
        self.single_row(
            self.client.post(self.table_url(TOKENS)).json(&token),
            "insert_token",
            "invitation_token",
        )
        .await
    }

    async fn find_token(&self, token: &str) -> RepositoryResult<Option<InvitationToken>> {
        let mut rows: Vec<InvitationToken> = self
            .rows(
                self.client
                    .get(self.table_url(TOKENS))
                    .query(&[("token", Self::eq(token)), ("select", "*".to_string())]),
                "find_token",
                "invitation_token",
            )
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn mark_token_used(
        &self,
        token: &str,
        used_at: DateTime<Utc>,
    ) -> RepositoryResult<InvitationToken> {
        let body = serde_json::json!({ "used": true, "used_at": used_at });
        self.single_row(
            self.client
                .patch(self.table_url(TOKENS))
                .query(&[("token", Self::eq(token))])
                .json(&body),
            "mark_token_used",
            "invitation_token",
        )
        .await
    }

    async fn invalidate_tokens_for_email(&self, email: &str) -> RepositoryResult<usize> {
        let body = serde_json::json!({ "used": true, "used_at": Utc::now() });
        let rows: Vec<InvitationToken> = self
            .rows(
                self.client
                    .patch(self.table_url(TOKENS))
                    .query(&[
                        ("email", Self::eq(email.to_lowercase())),
                        ("used", "eq.false".to_string()),
                    ])
                    .json(&body)
                    .header("Prefer", "return=representation"),
                "invalidate_tokens_for_email",
                "invitation_token",
            )
            .await?;
        Ok(rows.len())
    }
}

#[async_trait]
impl FullRepository for RemoteRepository {
    async fn ping(&self) -> RepositoryResult<bool> {
        let response = self
            .authed(self.client.get(format!("{}/rest/v1/", self.config.base_url)))
            .send()
            .await?;
        Ok(response.status().is_success())
    }
}
