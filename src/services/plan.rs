//! Assembles the calendar view: a rolling window of weeks with the planned
//! session (if any) attached to each day.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::{ProfileId, TrainingSession};
use crate::db::repository::{FullRepository, RepositoryError, SessionRepository};
use crate::models::{week_dates, week_label, PlanWindow};

#[derive(Debug, Clone, Serialize)]
pub struct PlanDay {
    pub date: NaiveDate,
    pub session: Option<TrainingSession>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanWeek {
    pub start: NaiveDate,
    pub label: String,
    pub is_past: bool,
    pub days: Vec<PlanDay>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingPlan {
    pub athlete_id: ProfileId,
    pub weeks: Vec<PlanWeek>,
}

/// Fetch every session inside the window with one query and lay them out on
/// the week grid. At most one session exists per (athlete, date).
pub async fn build_plan(
    repo: &dyn FullRepository,
    athlete_id: ProfileId,
    window: &PlanWindow,
) -> Result<TrainingPlan, RepositoryError> {
    let (Some(start), Some(end)) = (window.start(), window.end()) else {
        return Ok(TrainingPlan {
            athlete_id,
            weeks: Vec::new(),
        });
    };

    let sessions = repo.fetch_sessions(athlete_id, start, end).await?;
    let mut by_date: HashMap<NaiveDate, TrainingSession> =
        sessions.into_iter().map(|s| (s.date, s)).collect();

    let weeks = window
        .week_starts
        .iter()
        .enumerate()
        .map(|(i, &monday)| PlanWeek {
            start: monday,
            label: week_label(monday),
            is_past: window.is_past(i),
            days: week_dates(monday)
                .into_iter()
                .map(|date| PlanDay {
                    date,
                    session: by_date.remove(&date),
                })
                .collect(),
        })
        .collect();

    Ok(TrainingPlan { athlete_id, weeks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SessionType;
    use crate::db::models::{NewProfile, PlannedSessionUpsert};
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::{ProfileRepository, SessionRepository};

    async fn seed_athlete(repo: &LocalRepository) -> ProfileId {
        repo.insert_profile(NewProfile {
            auth_uid: None,
            full_name: "A".to_string(),
            email: "a@ex.test".to_string(),
            role: crate::api::Role::Athlete,
            sport: None,
            coach_id: None,
        })
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_plan_places_sessions_on_their_days() {
        let repo = LocalRepository::new();
        let athlete = seed_athlete(&repo).await;

        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap(); // Wednesday
        let window = PlanWindow::rolling(today, 2, 3, 0);

        let wed = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        repo.upsert_planned_session(
            athlete,
            wed,
            PlannedSessionUpsert {
                session_type: SessionType::Vma,
                description: "8x400".to_string(),
            },
        )
        .await
        .unwrap();

        let plan = build_plan(&repo, athlete, &window).await.unwrap();
        assert_eq!(plan.weeks.len(), 5);

        // Current week is the third (two past weeks before it).
        let current = &plan.weeks[2];
        assert_eq!(current.start, NaiveDate::from_ymd_opt(2026, 8, 24).unwrap());
        assert!(!current.is_past);
        assert!(plan.weeks[0].is_past && plan.weeks[1].is_past);

        assert_eq!(current.days.len(), 7);
        let day = &current.days[2];
        assert_eq!(day.date, wed);
        let session = day.session.as_ref().unwrap();
        assert_eq!(session.session_type, SessionType::Vma);
        assert_eq!(session.description, "8x400");

        // Every other day of that week is empty.
        assert_eq!(current.days.iter().filter(|d| d.session.is_some()).count(), 1);
    }

    #[tokio::test]
    async fn test_plan_excludes_sessions_outside_window() {
        let repo = LocalRepository::new();
        let athlete = seed_athlete(&repo).await;
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let window = PlanWindow::rolling(today, 1, 1, 0);

        repo.upsert_planned_session(
            athlete,
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            PlannedSessionUpsert {
                session_type: SessionType::Endurance,
                description: String::new(),
            },
        )
        .await
        .unwrap();

        let plan = build_plan(&repo, athlete, &window).await.unwrap();
        let placed: usize = plan
            .weeks
            .iter()
            .flat_map(|w| &w.days)
            .filter(|d| d.session.is_some())
            .count();
        assert_eq!(placed, 0);
    }

    #[tokio::test]
    async fn test_empty_window_yields_empty_plan() {
        let repo = LocalRepository::new();
        let athlete = seed_athlete(&repo).await;
        let window = PlanWindow {
            week_starts: Vec::new(),
            past_weeks: 0,
        };
        let plan = build_plan(&repo, athlete, &window).await.unwrap();
        assert!(plan.weeks.is_empty());
    }
}
