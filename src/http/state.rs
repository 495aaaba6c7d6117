//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::platform::{AuthProvider, InviteSettings};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for row storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Auth platform used by the privileged account endpoints
    pub auth: Arc<dyn AuthProvider>,
    /// Invitation link target and token lifetime
    pub invites: InviteSettings,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        repository: Arc<dyn FullRepository>,
        auth: Arc<dyn AuthProvider>,
        invites: InviteSettings,
    ) -> Self {
        Self {
            repository,
            auth,
            invites,
        }
    }
}
