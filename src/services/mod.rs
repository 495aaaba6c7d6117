//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that sits between the storage and
//! platform integrations and the HTTP handlers. Services orchestrate
//! repository and auth-provider calls and implement the flows the endpoints
//! expose.

pub mod invitations;

pub mod password;

pub mod plan;

pub mod provisioning;

pub use invitations::{InviteError, issue_invitation, validate_invitation};
pub use password::{resend_invite, set_password, PasswordError};
pub use plan::{build_plan, PlanDay, PlanWeek, TrainingPlan};
pub use provisioning::{create_athlete, delete_athlete, CreatedAthlete, NewAthlete, ProvisioningError};
