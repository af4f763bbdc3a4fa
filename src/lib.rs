//! # Wettkämpfe Timer
//!
//! Stopwatch, scoring and round sharing for youth fire-brigade competitions.
//!
//! ## Architecture
//!
//! - [`models`]: teams, rounds, laps and the fixed activity table
//! - [`services`]: time formatting, activity segmentation, round comparison,
//!   scoring and the lap recorder
//! - [`db`]: the local team/round store and the shared-round backends
//! - [`config`]: server configuration from the environment
//! - [`http`]: axum endpoints for sharing rounds and oEmbed
//!

// RepositoryError carries an ErrorContext in every variant
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
