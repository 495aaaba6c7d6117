use chrono::NaiveDate;

use crate::api::{Activity, Role, SessionType};
use crate::db::models::{CompletionUpdate, NewCompletedSession, NewProfile, PlannedSessionUpsert};
use crate::db::repositories::LocalRepository;
use crate::db::repository::RepositoryError;
use crate::db::services;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

async fn seed_athlete(repo: &LocalRepository, email: &str) -> crate::api::Profile {
    use crate::db::repository::ProfileRepository;
    repo.insert_profile(NewProfile {
        auth_uid: None,
        full_name: "Test Athlete".to_string(),
        email: email.to_string(),
        role: Role::Athlete,
        sport: None,
        coach_id: None,
    })
    .await
    .unwrap()
}

async fn seed_coach(repo: &LocalRepository, email: &str) -> crate::api::Profile {
    use crate::db::repository::ProfileRepository;
    repo.insert_profile(NewProfile {
        auth_uid: None,
        full_name: "Test Coach".to_string(),
        email: email.to_string(),
        role: Role::Coach,
        sport: None,
        coach_id: None,
    })
    .await
    .unwrap()
}

fn completed(date: NaiveDate) -> NewCompletedSession {
    NewCompletedSession {
        date,
        activity: Activity::Run,
        duration_min: 60,
        distance_km: Some(12.0),
        rpe: 6,
        fatigue: 2,
        sleep_quality: 3,
        comment: String::new(),
    }
}

#[tokio::test]
async fn test_health_check_local() {
    let repo = LocalRepository::new();
    assert!(services::health_check(&repo).await.unwrap());
}

#[tokio::test]
async fn test_upsert_rejects_coach_target() {
    let repo = LocalRepository::new();
    let coach = seed_coach(&repo, "coach@test").await;

    let err = services::upsert_planned_session(
        &repo,
        coach.id,
        d(2026, 8, 24),
        PlannedSessionUpsert {
            session_type: SessionType::Endurance,
            description: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_upsert_rejects_unknown_athlete() {
    let repo = LocalRepository::new();
    let err = services::upsert_planned_session(
        &repo,
        crate::api::ProfileId::generate(),
        d(2026, 8, 24),
        PlannedSessionUpsert {
            session_type: SessionType::Endurance,
            description: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_fetch_sessions_rejects_unknown_athlete() {
    let repo = LocalRepository::new();
    let unknown = crate::api::ProfileId::generate();

    let err = services::fetch_sessions(&repo, unknown, d(2026, 8, 10), d(2026, 8, 24))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    let err = services::fetch_completed_sessions(&repo, unknown, d(2026, 8, 10), d(2026, 8, 24))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_fetch_sessions_rejects_inverted_range() {
    let repo = LocalRepository::new();
    let athlete = seed_athlete(&repo, "a@test").await;
    let err = services::fetch_sessions(&repo, athlete.id, d(2026, 8, 24), d(2026, 8, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_log_completion_marks_session() {
    let repo = LocalRepository::new();
    let athlete = seed_athlete(&repo, "a@test").await;
    let session = services::upsert_planned_session(
        &repo,
        athlete.id,
        d(2026, 8, 24),
        PlannedSessionUpsert {
            session_type: SessionType::Endurance,
            description: "easy run".to_string(),
        },
    )
    .await
    .unwrap();

    let updated = services::log_completion(
        &repo,
        session.id,
        CompletionUpdate {
            completed_notes: Some("windy".to_string()),
            completed_time_minutes: Some(50),
            completed_distance_km: Some(11.0),
        },
    )
    .await
    .unwrap();

    assert!(updated.is_completed);
    assert_eq!(updated.completed_notes.as_deref(), Some("windy"));
}

#[tokio::test]
async fn test_log_completion_rejects_zero_minutes() {
    let repo = LocalRepository::new();
    let athlete = seed_athlete(&repo, "a@test").await;
    let session = services::upsert_planned_session(
        &repo,
        athlete.id,
        d(2026, 8, 24),
        PlannedSessionUpsert {
            session_type: SessionType::Endurance,
            description: String::new(),
        },
    )
    .await
    .unwrap();

    let err = services::log_completion(
        &repo,
        session.id,
        CompletionUpdate {
            completed_time_minutes: Some(0),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_record_completed_session_validates_markers() {
    let repo = LocalRepository::new();
    let athlete = seed_athlete(&repo, "a@test").await;

    for (field, session) in [
        ("rpe", NewCompletedSession { rpe: 0, ..completed(d(2026, 8, 24)) }),
        ("rpe", NewCompletedSession { rpe: 11, ..completed(d(2026, 8, 24)) }),
        ("fatigue", NewCompletedSession { fatigue: 6, ..completed(d(2026, 8, 24)) }),
        ("sleep", NewCompletedSession { sleep_quality: 0, ..completed(d(2026, 8, 24)) }),
        ("duration", NewCompletedSession { duration_min: 0, ..completed(d(2026, 8, 24)) }),
    ] {
        let err = services::record_completed_session(&repo, athlete.id, session)
            .await
            .unwrap_err();
        assert!(
            matches!(err, RepositoryError::ValidationError { .. }),
            "expected validation error for {}",
            field
        );
    }

    let ok = services::record_completed_session(&repo, athlete.id, completed(d(2026, 8, 24)))
        .await
        .unwrap();
    assert_eq!(ok.duration_min, 60);
}

#[tokio::test]
async fn test_update_profile_null_clears_field() {
    use crate::db::models::ProfilePatch;
    let repo = LocalRepository::new();
    let athlete = seed_athlete(&repo, "a@test").await;

    let set: ProfilePatch =
        serde_json::from_value(serde_json::json!({ "goal": "sub-40 10k" })).unwrap();
    let updated = services::update_profile(&repo, athlete.id, set).await.unwrap();
    assert_eq!(updated.goal.as_deref(), Some("sub-40 10k"));

    // A present-but-null field clears the column; a null-only patch is not
    // rejected as empty.
    let clear: ProfilePatch = serde_json::from_value(serde_json::json!({ "goal": null })).unwrap();
    let cleared = services::update_profile(&repo, athlete.id, clear).await.unwrap();
    assert!(cleared.goal.is_none());
}

#[tokio::test]
async fn test_update_profile_rejects_empty_patch() {
    let repo = LocalRepository::new();
    let athlete = seed_athlete(&repo, "a@test").await;
    let err = services::update_profile(&repo, athlete.id, Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_list_athletes_filters_by_coach() {
    use crate::db::repository::ProfileRepository;
    let repo = LocalRepository::new();
    let coach = seed_coach(&repo, "coach@test").await;
    let other_coach = seed_coach(&repo, "other@test").await;

    for (email, coach_id) in [
        ("a1@test", Some(coach.id)),
        ("a2@test", Some(coach.id)),
        ("a3@test", Some(other_coach.id)),
    ] {
        repo.insert_profile(NewProfile {
            auth_uid: None,
            full_name: email.to_string(),
            email: email.to_string(),
            role: Role::Athlete,
            sport: None,
            coach_id,
        })
        .await
        .unwrap();
    }

    let athletes = services::list_athletes(&repo, coach.id).await.unwrap();
    assert_eq!(athletes.len(), 2);
}
