//! Clipstore core library
//!
//! Shared foundation for the clipstore workspace: configuration, the unified
//! `AppError` type with its HTTP presentation metadata, domain models, and the
//! storage backend selector.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
