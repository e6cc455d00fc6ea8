//! Storage backends for published video objects.
//!
//! Two backends implement the [`Storage`] trait:
//! - S3 (or any S3-compatible provider) via `object_store`
//! - Local filesystem, for development and tests
//!
//! Keys are generated with [`keys::publish_key`] and are always of the form
//! `{prefix}/{uuid}.{ext}`. The locator returned by `put_file` is the public
//! URL a client can fetch the object from.

pub mod factory;
pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

pub use clipstore_core::StorageBackend;
pub use factory::create_storage;
pub use keys::{extension_for_content_type, publish_key};
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
