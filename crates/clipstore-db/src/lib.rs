//! Database repositories for data access layer
//!
//! The upload pipeline only ever reads a video record and writes its published
//! locator back, so the surface here is deliberately small: the [`VideoStore`]
//! trait and its Postgres implementation.

pub mod pool;
pub mod video;

pub use pool::setup_database;
pub use video::{PgVideoStore, VideoStore};
