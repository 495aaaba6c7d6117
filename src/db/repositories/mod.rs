//! Repository implementations module.
//!
//! This module contains different implementations of the repository traits:
//! - `remote`: hosted backend row-level REST API over reqwest
//! - `local`: in-memory implementation for unit testing and local development
pub mod local;
#[cfg(feature = "remote-repo")]
pub mod remote;

pub use local::LocalRepository;
#[cfg(feature = "remote-repo")]
pub use remote::{RemoteConfig, RemoteRepository};
