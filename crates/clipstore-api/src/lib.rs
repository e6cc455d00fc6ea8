//! HTTP API for the video ingestion service.
//!
//! Exposed as a library so integration tests can build the router with
//! in-process collaborators instead of Postgres, S3 and ffmpeg.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
