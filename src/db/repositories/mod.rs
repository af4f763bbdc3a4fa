//! Shared-round repository implementations.
//!
//! - `filesystem`: one JSON document per round, used in production
//! - `memory`: process-local map for tests and local development
pub mod filesystem;
pub mod memory;

pub use filesystem::{validate_round_id, FileSystem, FilesystemRepository, TokioFileSystem};
pub use memory::InMemoryRepository;
