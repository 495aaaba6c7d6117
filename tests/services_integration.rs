use chrono::NaiveDate;

use trainplan::api::{Activity, ProfileId, Role, SessionType};
use trainplan::db::models::{
    CompletionUpdate, NewCompletedSession, NewProfile, PlannedSessionUpsert, ProfilePatch,
};
use trainplan::db::repositories::LocalRepository;
use trainplan::db::services::{
    fetch_completed_sessions, fetch_sessions, get_profile, health_check, list_athletes,
    log_completion, record_completed_session, update_profile, upsert_planned_session,
};

fn new_profile(name: &str, email: &str, role: Role, coach_id: Option<ProfileId>) -> NewProfile {
    NewProfile {
        auth_uid: None,
        full_name: name.to_string(),
        email: email.to_string(),
        role,
        sport: Some("running".to_string()),
        coach_id,
    }
}

async fn seed_coach_and_athlete(repo: &LocalRepository) -> (ProfileId, ProfileId) {
    use trainplan::db::repository::ProfileRepository;
    let coach = repo
        .insert_profile(new_profile("Coach", "coach@ex.test", Role::Coach, None))
        .await
        .unwrap();
    let athlete = repo
        .insert_profile(new_profile(
            "Athlete",
            "athlete@ex.test",
            Role::Athlete,
            Some(coach.id),
        ))
        .await
        .unwrap();
    (coach.id, athlete.id)
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    let result = health_check(&repo).await;
    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[tokio::test]
async fn test_get_profile_and_update() {
    let repo = LocalRepository::new();
    let (_, athlete_id) = seed_coach_and_athlete(&repo).await;

    let profile = get_profile(&repo, athlete_id).await.unwrap();
    assert_eq!(profile.email, "athlete@ex.test");

    let patch = ProfilePatch {
        goal: Some(Some("sub-40 10k".to_string())),
        sessions_per_week: Some(Some(4)),
        ..Default::default()
    };
    let updated = update_profile(&repo, athlete_id, patch).await.unwrap();
    assert_eq!(updated.goal.as_deref(), Some("sub-40 10k"));
    assert_eq!(updated.sessions_per_week, Some(4));

    // Unchanged fields survive the patch.
    assert_eq!(updated.full_name, "Athlete");
}

#[tokio::test]
async fn test_update_profile_rejects_empty_patch() {
    let repo = LocalRepository::new();
    let (_, athlete_id) = seed_coach_and_athlete(&repo).await;

    let result = update_profile(&repo, athlete_id, ProfilePatch::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_update_profile_rejects_out_of_range_weekly_count() {
    let repo = LocalRepository::new();
    let (_, athlete_id) = seed_coach_and_athlete(&repo).await;

    for bad in [0u8, 15] {
        let patch = ProfilePatch {
            sessions_per_week: Some(Some(bad)),
            ..Default::default()
        };
        assert!(update_profile(&repo, athlete_id, patch).await.is_err());
    }
}

#[tokio::test]
async fn test_list_athletes_filters_by_coach() {
    use trainplan::db::repository::ProfileRepository;
    let repo = LocalRepository::new();
    let (coach_id, athlete_id) = seed_coach_and_athlete(&repo).await;

    // An athlete belonging to somebody else.
    let other_coach = repo
        .insert_profile(new_profile("Other", "other@ex.test", Role::Coach, None))
        .await
        .unwrap();
    repo.insert_profile(new_profile(
        "Stranger",
        "stranger@ex.test",
        Role::Athlete,
        Some(other_coach.id),
    ))
    .await
    .unwrap();

    let athletes = list_athletes(&repo, coach_id).await.unwrap();
    assert_eq!(athletes.len(), 1);
    assert_eq!(athletes[0].id, athlete_id);
}

#[tokio::test]
async fn test_plan_and_complete_session() {
    let repo = LocalRepository::new();
    let (_, athlete_id) = seed_coach_and_athlete(&repo).await;
    let date = d(2026, 9, 1);

    let planned = upsert_planned_session(
        &repo,
        athlete_id,
        date,
        PlannedSessionUpsert {
            session_type: SessionType::Endurance,
            description: "1h easy".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(!planned.is_completed);

    let completed = log_completion(
        &repo,
        planned.id,
        CompletionUpdate {
            completed_notes: Some("felt good".to_string()),
            completed_time_minutes: Some(61),
            completed_distance_km: Some(12.4),
        },
    )
    .await
    .unwrap();
    assert!(completed.is_completed);
    assert_eq!(completed.completed_time_minutes, Some(61));
}

#[tokio::test]
async fn test_replanning_keeps_completion_data() {
    let repo = LocalRepository::new();
    let (_, athlete_id) = seed_coach_and_athlete(&repo).await;
    let date = d(2026, 9, 2);

    let planned = upsert_planned_session(
        &repo,
        athlete_id,
        date,
        PlannedSessionUpsert {
            session_type: SessionType::Speed,
            description: "10x200".to_string(),
        },
    )
    .await
    .unwrap();

    log_completion(
        &repo,
        planned.id,
        CompletionUpdate {
            completed_notes: None,
            completed_time_minutes: Some(45),
            completed_distance_km: None,
        },
    )
    .await
    .unwrap();

    // The coach rewrites the cell after the athlete already logged it.
    let replanned = upsert_planned_session(
        &repo,
        athlete_id,
        date,
        PlannedSessionUpsert {
            session_type: SessionType::Vma,
            description: "8x400".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(replanned.id, planned.id);
    assert_eq!(replanned.session_type, SessionType::Vma);
    assert!(replanned.is_completed);
    assert_eq!(replanned.completed_time_minutes, Some(45));
}

#[tokio::test]
async fn test_cannot_plan_for_coach_profile() {
    let repo = LocalRepository::new();
    let (coach_id, _) = seed_coach_and_athlete(&repo).await;

    let result = upsert_planned_session(
        &repo,
        coach_id,
        d(2026, 9, 1),
        PlannedSessionUpsert {
            session_type: SessionType::Rest,
            description: String::new(),
        },
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_fetch_sessions_range_is_inclusive() {
    let repo = LocalRepository::new();
    let (_, athlete_id) = seed_coach_and_athlete(&repo).await;

    for day in [1u32, 7, 8] {
        upsert_planned_session(
            &repo,
            athlete_id,
            d(2026, 9, day),
            PlannedSessionUpsert {
                session_type: SessionType::Endurance,
                description: String::new(),
            },
        )
        .await
        .unwrap();
    }

    let sessions = fetch_sessions(&repo, athlete_id, d(2026, 9, 1), d(2026, 9, 7))
        .await
        .unwrap();
    assert_eq!(sessions.len(), 2);

    // Reversed bounds are rejected rather than silently returning nothing.
    assert!(
        fetch_sessions(&repo, athlete_id, d(2026, 9, 7), d(2026, 9, 1))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_completed_session_roundtrip_and_bounds() {
    let repo = LocalRepository::new();
    let (_, athlete_id) = seed_coach_and_athlete(&repo).await;

    let session = NewCompletedSession {
        date: d(2026, 9, 3),
        activity: Activity::Run,
        duration_min: 50,
        distance_km: Some(10.0),
        rpe: 7,
        fatigue: 3,
        sleep_quality: 4,
        comment: "tempo".to_string(),
    };
    let stored = record_completed_session(&repo, athlete_id, session.clone())
        .await
        .unwrap();
    assert_eq!(stored.athlete_id, athlete_id);
    assert_eq!(stored.rpe, 7);

    let listed = fetch_completed_sessions(&repo, athlete_id, d(2026, 9, 1), d(2026, 9, 30))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    // Out-of-range subjective markers are rejected.
    let mut bad = session.clone();
    bad.rpe = 11;
    assert!(record_completed_session(&repo, athlete_id, bad)
        .await
        .is_err());

    let mut bad = session.clone();
    bad.fatigue = 0;
    assert!(record_completed_session(&repo, athlete_id, bad)
        .await
        .is_err());

    let mut bad = session;
    bad.duration_min = 0;
    assert!(record_completed_session(&repo, athlete_id, bad)
        .await
        .is_err());
}

#[tokio::test]
async fn test_completed_session_requires_existing_athlete() {
    let repo = LocalRepository::new();
    let result = record_completed_session(
        &repo,
        ProfileId::generate(),
        NewCompletedSession {
            date: d(2026, 9, 3),
            activity: Activity::Bike,
            duration_min: 90,
            distance_km: None,
            rpe: 5,
            fatigue: 2,
            sleep_quality: 3,
            comment: String::new(),
        },
    )
    .await;
    assert!(result.is_err());
}
