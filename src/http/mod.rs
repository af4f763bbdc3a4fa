//! HTTP server module for sharing rounds.
//!
//! Exposes the shared-round storage and an oEmbed endpoint over axum.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Payload validation                                     │
//! │  - CORS headers, compression, tracing                     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  RepositoryProvider (db/factory.rs)                       │
//! │  - Filesystem or in-memory backend                        │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod fetcher;
pub mod handlers;
pub mod router;
pub mod state;

pub use fetcher::{HttpRoundFetcher, RepositoryRoundFetcher, SharedRoundFetcher};
pub use router::create_router;
pub use state::AppState;
