//! Upload-and-sign
//!
//! Sends the artifact to the bucket, then asks the store for a presigned GET
//! URL. Nothing is retried and nothing is rolled back: if signing fails, the
//! uploaded object stays where it is.

use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::request::{PRESIGN_EXPIRY_SECS, SignedUrlResult, UploadRequest};
use crate::traits::ObjectStore;

/// Publishes one artifact through an [`ObjectStore`]
pub struct Uploader<S> {
    store: S,
}

impl<S: ObjectStore> Uploader<S> {
    /// Create an uploader over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Upload `request.local_path` to `request.bucket/request.remote_key` and
    /// return a URL valid for [`PRESIGN_EXPIRY_SECS`] seconds.
    pub async fn upload_and_sign(&self, request: &UploadRequest) -> Result<SignedUrlResult> {
        let metadata = tokio::fs::metadata(&request.local_path)
            .await
            .map_err(|e| {
                Error::LocalFile(format!("{}: {e}", request.local_path.display()))
            })?;

        if !metadata.is_file() {
            return Err(Error::LocalFile(format!(
                "{} is not a regular file",
                request.local_path.display()
            )));
        }

        let target = request.target();
        let content_type = mime_guess::from_path(&request.local_path).first_raw();

        info!(
            "Uploading {} ({}) to {target}",
            request.local_path.display(),
            humansize::format_size(metadata.len(), humansize::BINARY)
        );

        let uploaded = self
            .store
            .put_file(&target, &request.local_path, content_type)
            .await?;

        debug!(
            size = uploaded.size_bytes,
            etag = uploaded.etag.as_deref().unwrap_or("-"),
            "Upload complete"
        );

        let url = self
            .store
            .presign_get(&target, Duration::from_secs(PRESIGN_EXPIRY_SECS))
            .await?;

        let result = SignedUrlResult::new(url);
        if let Some(expires_at) = result.expires_at() {
            debug!("Presigned URL for {target} expires at {expires_at}");
        }

        Ok(result)
    }
}
