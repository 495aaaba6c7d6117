//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;

use super::dto::{
    AckResponse, AthleteListQuery, AthleteListResponse, CompletedSession, CompletionUpdate,
    CreateAthleteRequest, CreateAthleteResponse, DateRangeQuery, DeleteAthleteRequest,
    HealthResponse, NewCompletedSession, PlanQuery, PlannedSessionUpsert, Profile, ProfileId,
    ProfilePatch, ResendInviteRequest, SessionId, SetPasswordRequest, SetPasswordResponse,
    TrainingPlan, TrainingSession, ValidateTokenQuery, ValidateTokenResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::PlanWindow;
use crate::services;
use crate::services::NewAthlete;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the row store
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Privileged account endpoints
// =============================================================================

/// POST /api/create-athlete
///
/// Create the auth user, the profile row, and an invitation token. The
/// initial password is never returned.
pub async fn create_athlete(
    State(state): State<AppState>,
    Json(request): Json<CreateAthleteRequest>,
) -> HandlerResult<CreateAthleteResponse> {
    let created = services::create_athlete(
        state.repository.as_ref(),
        state.auth.as_ref(),
        &state.invites,
        NewAthlete {
            full_name: request.full_name,
            email: request.email,
            sport: request.sport,
            coach_id: request.coach_id,
            password: request.password,
        },
    )
    .await?;

    Ok(Json(CreateAthleteResponse {
        user_id: created.user_id,
        profile: created.profile,
        invite_token: created.invite.token,
        invite_expires_at: created.invite.expires_at,
        recovery_email_sent: created.recovery_email_sent,
    }))
}

/// POST /api/delete-athlete
///
/// Remove the auth user, profile row, and the athlete's session rows.
pub async fn delete_athlete(
    State(state): State<AppState>,
    Json(request): Json<DeleteAthleteRequest>,
) -> HandlerResult<AckResponse> {
    services::delete_athlete(
        state.repository.as_ref(),
        state.auth.as_ref(),
        request.profile_id,
    )
    .await?;
    Ok(Json(AckResponse { success: true }))
}

/// POST /api/resend-invite
///
/// Re-send the recovery email pointing at the app's auth callback page.
pub async fn resend_invite(
    State(state): State<AppState>,
    Json(request): Json<ResendInviteRequest>,
) -> HandlerResult<AckResponse> {
    services::resend_invite(state.auth.as_ref(), &state.invites, &request.email).await?;
    Ok(Json(AckResponse { success: true }))
}

/// POST /api/set-password
///
/// Set the password for the account behind an invitation token, consuming
/// the token.
pub async fn set_password(
    State(state): State<AppState>,
    Json(request): Json<SetPasswordRequest>,
) -> HandlerResult<SetPasswordResponse> {
    let email = services::set_password(
        state.repository.as_ref(),
        state.auth.as_ref(),
        &request.token,
        &request.password,
    )
    .await?;
    Ok(Json(SetPasswordResponse {
        success: true,
        email,
    }))
}

/// GET /api/validate-invite-token?token=...
///
/// Check an invitation token without consuming it.
pub async fn validate_invite_token(
    State(state): State<AppState>,
    Query(query): Query<ValidateTokenQuery>,
) -> HandlerResult<ValidateTokenResponse> {
    let invite = services::validate_invitation(state.repository.as_ref(), &query.token).await?;
    Ok(Json(ValidateTokenResponse {
        valid: true,
        email: invite.email,
    }))
}

// =============================================================================
// Profiles
// =============================================================================

/// GET /v1/athletes?coach_id=...
pub async fn list_athletes(
    State(state): State<AppState>,
    Query(query): Query<AthleteListQuery>,
) -> HandlerResult<AthleteListResponse> {
    let athletes = db_services::list_athletes(state.repository.as_ref(), query.coach_id).await?;
    let total = athletes.len();
    Ok(Json(AthleteListResponse { athletes, total }))
}

/// GET /v1/profiles/{profile_id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<ProfileId>,
) -> HandlerResult<Profile> {
    let profile = db_services::get_profile(state.repository.as_ref(), profile_id).await?;
    Ok(Json(profile))
}

/// PATCH /v1/profiles/{profile_id}
pub async fn patch_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<ProfileId>,
    Json(patch): Json<ProfilePatch>,
) -> HandlerResult<Profile> {
    let profile = db_services::update_profile(state.repository.as_ref(), profile_id, patch).await?;
    Ok(Json(profile))
}

// =============================================================================
// Planned sessions
// =============================================================================

/// GET /v1/athletes/{athlete_id}/sessions?start=...&end=...
pub async fn list_sessions(
    State(state): State<AppState>,
    Path(athlete_id): Path<ProfileId>,
    Query(range): Query<DateRangeQuery>,
) -> HandlerResult<Vec<TrainingSession>> {
    let sessions =
        db_services::fetch_sessions(state.repository.as_ref(), athlete_id, range.start, range.end)
            .await?;
    Ok(Json(sessions))
}

/// PUT /v1/athletes/{athlete_id}/sessions/{date}
///
/// Write the planned content of one calendar cell. Re-planning an already
/// logged day keeps the completion data.
pub async fn upsert_session(
    State(state): State<AppState>,
    Path((athlete_id, date)): Path<(ProfileId, NaiveDate)>,
    Json(upsert): Json<PlannedSessionUpsert>,
) -> HandlerResult<TrainingSession> {
    let session =
        db_services::upsert_planned_session(state.repository.as_ref(), athlete_id, date, upsert)
            .await?;
    Ok(Json(session))
}

/// PATCH /v1/sessions/{session_id}/completion
pub async fn patch_completion(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    Json(update): Json<CompletionUpdate>,
) -> HandlerResult<TrainingSession> {
    let session =
        db_services::log_completion(state.repository.as_ref(), session_id, update).await?;
    Ok(Json(session))
}

// =============================================================================
// Completed sessions
// =============================================================================

/// GET /v1/athletes/{athlete_id}/completed-sessions?start=...&end=...
pub async fn list_completed_sessions(
    State(state): State<AppState>,
    Path(athlete_id): Path<ProfileId>,
    Query(range): Query<DateRangeQuery>,
) -> HandlerResult<Vec<CompletedSession>> {
    let sessions = db_services::fetch_completed_sessions(
        state.repository.as_ref(),
        athlete_id,
        range.start,
        range.end,
    )
    .await?;
    Ok(Json(sessions))
}

/// POST /v1/athletes/{athlete_id}/completed-sessions
pub async fn create_completed_session(
    State(state): State<AppState>,
    Path(athlete_id): Path<ProfileId>,
    Json(session): Json<NewCompletedSession>,
) -> HandlerResult<CompletedSession> {
    let created =
        db_services::record_completed_session(state.repository.as_ref(), athlete_id, session)
            .await?;
    Ok(Json(created))
}

// =============================================================================
// Plan grid
// =============================================================================

/// GET /v1/athletes/{athlete_id}/plan
///
/// Rolling week grid with planned sessions placed on their days. Defaults
/// to two weeks of history plus the current and three upcoming weeks.
pub async fn get_plan(
    State(state): State<AppState>,
    Path(athlete_id): Path<ProfileId>,
    Query(query): Query<PlanQuery>,
) -> HandlerResult<TrainingPlan> {
    // The target must exist so unknown athletes 404 instead of returning
    // an empty grid.
    db_services::get_profile(state.repository.as_ref(), athlete_id).await?;

    let window = PlanWindow::rolling(
        chrono::Utc::now().date_naive(),
        query.past_weeks.unwrap_or(PlanWindow::DEFAULT_PAST_WEEKS),
        query
            .future_weeks
            .unwrap_or(PlanWindow::DEFAULT_FUTURE_WEEKS),
        query.offset.unwrap_or(0),
    );

    let plan = services::build_plan(state.repository.as_ref(), athlete_id, &window).await?;
    Ok(Json(plan))
}
