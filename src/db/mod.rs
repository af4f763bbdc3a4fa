//! Storage for teams, rounds and shared rounds.
//!
//! Two independent stores live here:
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────────┐
//! │  LocalStore (local.rs)       │   │  SharedRoundRepository (trait)   │
//! │  teams / rounds / settings   │   │  public shared-round documents   │
//! │  in memory or JSON snapshot  │   └───────────────┬──────────────────┘
//! └──────────────────────────────┘           ┌───────┴────────┐
//!                                            │                │
//!                                     filesystem.rs       memory.rs
//! ```
//!
//! - `local`: the client's own data, one store per device
//! - `repository`: trait and error types for the shared-round backends
//! - `repositories`: filesystem and in-memory backends
//! - `factory`: backend selection and the [`RepositoryProvider`] handed to the HTTP layer
//! - `repo_config`: optional `repository.toml`
//!
//! # Usage
//! ```ignore
//! use wettkampf_timer::config::AppConfig;
//! use wettkampf_timer::db::RepositoryProvider;
//!
//! async fn example(round: &wettkampf_timer::models::SharedRoundData) -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = RepositoryProvider::from_config(&AppConfig::from_env());
//!     provider.get().store(round).await?;
//!     Ok(())
//! }
//! ```

pub mod factory;
pub mod local;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryProvider, RepositoryType};
pub use local::LocalStore;
pub use repo_config::RepositoryConfig;
pub use repositories::{FilesystemRepository, InMemoryRepository};
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, SharedRoundRepository};
