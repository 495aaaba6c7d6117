//! Repository trait definitions.
//!
//! The repository layer abstracts over where rows live: the in-memory local
//! store or the hosted backend's row-level REST API. Handlers and services
//! only ever see these traits.

pub mod error;
pub mod profiles;
pub mod sessions;
pub mod tokens;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use profiles::ProfileRepository;
pub use sessions::SessionRepository;
pub use tokens::TokenRepository;

use async_trait::async_trait;

/// Combined repository interface covering every table the application uses.
///
/// `ping` backs the health endpoint; for the hosted backend it performs a
/// cheap authenticated request, for the local store it always succeeds.
#[async_trait]
pub trait FullRepository:
    ProfileRepository + SessionRepository + TokenRepository + Send + Sync
{
    /// Verify the storage backend is reachable.
    async fn ping(&self) -> RepositoryResult<bool>;
}
