//! Storage module for uploaded images
//!
//! Provides local-disk storage for originals and their thumbnails.

mod local_storage;

pub use local_storage::LocalStorage;
