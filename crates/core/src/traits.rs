//! ObjectStore trait definition
//!
//! This trait is the seam between the uploader and the storage provider.
//! The COS adapter implements it; tests substitute a mock.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::path::RemotePath;

/// What the provider reported about a finished upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedObject {
    /// Bytes sent
    pub size_bytes: u64,

    /// ETag returned by the provider, quotes stripped
    pub etag: Option<String>,
}

/// Storage operations needed to publish one artifact
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file, overwriting any object at the same key
    ///
    /// Failures are reported as [`crate::Error::Upload`].
    async fn put_file(
        &self,
        target: &RemotePath,
        local_path: &Path,
        content_type: Option<&'static str>,
    ) -> Result<UploadedObject>;

    /// Produce a GET URL for the object valid for `expires_in`
    ///
    /// Failures are reported as [`crate::Error::Signing`].
    async fn presign_get(&self, target: &RemotePath, expires_in: Duration) -> Result<String>;
}
