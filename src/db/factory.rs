//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository
//! instances based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
#[cfg(feature = "remote-repo")]
use super::repositories::{RemoteConfig, RemoteRepository};
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Hosted backend row API
    Remote,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("remote", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" | "hosted" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variables.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Remote when a platform URL is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("PLATFORM_URL").is_ok() {
            Self::Remote
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    ///
    /// # Returns
    /// * `Ok(Arc<dyn FullRepository>)` - Boxed repository instance
    /// * `Err(RepositoryError)` - If creation fails
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Remote => {
                #[cfg(feature = "remote-repo")]
                {
                    let config =
                        RemoteConfig::from_env().map_err(RepositoryError::configuration)?;
                    Ok(Self::create_remote(config)? as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "remote-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Remote repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a hosted-backend repository.
    #[cfg(feature = "remote-repo")]
    pub fn create_remote(config: RemoteConfig) -> RepositoryResult<Arc<RemoteRepository>> {
        Ok(Arc::new(RemoteRepository::new(config)?))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        Self::create(RepositoryType::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_parsing() {
        assert_eq!("local".parse::<RepositoryType>(), Ok(RepositoryType::Local));
        assert_eq!(
            "Remote".parse::<RepositoryType>(),
            Ok(RepositoryType::Remote)
        );
        assert_eq!(
            "hosted".parse::<RepositoryType>(),
            Ok(RepositoryType::Remote)
        );
        assert!("mysql".parse::<RepositoryType>().is_err());
    }

    #[test]
    fn test_create_local() {
        let _repo = RepositoryFactory::create(RepositoryType::Local).unwrap();
    }
}
