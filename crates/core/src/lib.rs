//! cos-upload-core: Core library for the cos-upload CI helper
//!
//! This crate provides:
//! - Environment configuration
//! - The upload request and signed URL result types
//! - ObjectStore trait for the storage provider
//! - The uploader that ties them together
//!
//! This crate is independent of any specific storage SDK, so the uploader can
//! be tested against a mock store.

pub mod config;
pub mod error;
pub mod path;
pub mod request;
pub mod traits;
pub mod uploader;

pub use config::{CosConfig, mask_secret};
pub use error::{Error, Result};
pub use path::RemotePath;
pub use request::{PRESIGN_EXPIRY_SECS, SignedUrlResult, UploadRequest};
pub use traits::{ObjectStore, UploadedObject};
pub use uploader::Uploader;
