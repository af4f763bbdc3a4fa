//! Storage trait definitions.
//!
//! # Module Organization
//!
//! - [`error`]: Error types shared by every store
//! - [`shared_round`]: The publish store behind the share endpoint

pub mod error;
pub mod shared_round;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use shared_round::SharedRoundRepository;
