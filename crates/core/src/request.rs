//! Upload request and signed URL result
//!
//! Both are transient: one request is built per run and one result is
//! produced, published and dropped.

use std::fmt;
use std::path::PathBuf;

use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::config::{CosConfig, mask_secret};
use crate::error::{Error, Result};
use crate::path::RemotePath;

/// Lifetime of every presigned URL, in seconds
pub const PRESIGN_EXPIRY_SECS: u64 = 600;

/// Everything needed for a single upload-and-sign run
#[derive(Clone)]
pub struct UploadRequest {
    pub secret_id: String,
    pub secret_key: String,
    pub region: String,
    pub bucket: String,
    pub local_path: PathBuf,
    pub remote_key: String,
    /// Endpoint override carried over from the configuration
    pub endpoint: Option<String>,
}

impl UploadRequest {
    /// Combine the environment configuration with the CLI arguments
    ///
    /// Fails if any of the six required fields is empty.
    pub fn new(
        config: CosConfig,
        local_path: impl Into<PathBuf>,
        remote_key: impl Into<String>,
    ) -> Result<Self> {
        let request = Self {
            secret_id: config.secret_id,
            secret_key: config.secret_key,
            region: config.region,
            bucket: config.bucket,
            local_path: local_path.into(),
            remote_key: remote_key.into(),
            endpoint: config.endpoint,
        };
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("secret_id", self.secret_id.is_empty()),
            ("secret_key", self.secret_key.is_empty()),
            ("region", self.region.is_empty()),
            ("bucket", self.bucket.is_empty()),
            ("local_path", self.local_path.as_os_str().is_empty()),
            ("remote_key", self.remote_key.is_empty()),
        ];

        let empty: Vec<&str> = fields
            .iter()
            .filter(|(_, is_empty)| *is_empty)
            .map(|(name, _)| *name)
            .collect();

        if empty.is_empty() {
            Ok(())
        } else {
            Err(Error::Usage(format!(
                "Empty upload request fields: {}",
                empty.join(", ")
            )))
        }
    }

    /// Remote location of the object
    pub fn target(&self) -> RemotePath {
        RemotePath::new(&self.bucket, &self.remote_key)
    }
}

impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("secret_id", &mask_secret(&self.secret_id))
            .field("secret_key", &"***")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("local_path", &self.local_path)
            .field("remote_key", &self.remote_key)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// A presigned GET URL for the uploaded object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedUrlResult {
    pub url: String,
    pub expires_in_secs: u64,
    /// When the URL was signed
    pub generated_at: Timestamp,
}

impl SignedUrlResult {
    /// Wrap a freshly signed URL, stamping it with the current time
    pub fn new(url: impl Into<String>) -> Self {
        Self::at(url, Timestamp::now())
    }

    /// Wrap a URL signed at a known time
    pub fn at(url: impl Into<String>, generated_at: Timestamp) -> Self {
        Self {
            url: url.into(),
            expires_in_secs: PRESIGN_EXPIRY_SECS,
            generated_at,
        }
    }

    /// Moment the URL stops working
    pub fn expires_at(&self) -> Option<Timestamp> {
        let secs = i64::try_from(self.expires_in_secs).ok()?;
        self.generated_at
            .checked_add(SignedDuration::from_secs(secs))
            .ok()
    }
}
