//! Modules layer - Infrastructure components for external integrations
//!
//! Contains local storage, image processing and the captioning model client.

pub mod captioning;
pub mod imaging;
pub mod storage;
