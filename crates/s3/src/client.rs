//! COS client implementation
//!
//! Wraps aws-sdk-s3 pointed at the COS S3-compatible endpoint and implements
//! the ObjectStore trait from cos-upload-core.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{RequestChecksumCalculation, ResponseChecksumValidation};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use cos_upload_core::config::endpoint_url;
use cos_upload_core::{Error, ObjectStore, RemotePath, Result, UploadRequest, UploadedObject};

/// COS client wrapper
pub struct CosClient {
    inner: aws_sdk_s3::Client,
    endpoint: String,
}

impl CosClient {
    /// Create a new client from the credentials and region of an upload request
    pub async fn new(request: &UploadRequest) -> Result<Self> {
        let endpoint = endpoint_url(&request.region, request.endpoint.as_deref())?
            .as_str()
            .trim_end_matches('/')
            .to_string();

        // Build credentials provider
        let credentials = aws_credential_types::Credentials::new(
            request.secret_id.clone(),
            request.secret_key.clone(),
            None, // session token
            None, // expiry
            "cos-upload-static-credentials",
        );

        // Build SDK config
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(request.region.clone()))
            .endpoint_url(&endpoint)
            .load()
            .await;

        // COS only serves virtual-hosted buckets and rejects the SDK's default
        // aws-chunked checksum trailers
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(false)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired)
            .build();

        debug!(region = %request.region, endpoint = %endpoint, "Created COS client");

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            endpoint,
        })
    }

    /// Endpoint the client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ObjectStore for CosClient {
    async fn put_file(
        &self,
        target: &RemotePath,
        local_path: &Path,
        content_type: Option<&'static str>,
    ) -> Result<UploadedObject> {
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| Error::Upload(format!("{}: {e}", local_path.display())))?;
        let size = body.size_hint().1.unwrap_or_default();

        let mut request = self
            .inner
            .put_object()
            .bucket(&target.bucket)
            .key(&target.key)
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Upload(DisplayErrorContext(&e).to_string()))?;

        Ok(UploadedObject {
            size_bytes: size,
            etag: response.e_tag().map(|etag| etag.trim_matches('"').to_string()),
        })
    }

    async fn presign_get(&self, target: &RemotePath, expires_in: Duration) -> Result<String> {
        let presigning_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| Error::Signing(format!("Invalid presigning config: {e}")))?;

        let presigned = self
            .inner
            .get_object()
            .bucket(&target.bucket)
            .key(&target.key)
            .presigned(presigning_config)
            .await
            .map_err(|e| Error::Signing(DisplayErrorContext(&e).to_string()))?;

        Ok(presigned.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cos_upload_core::CosConfig;

    fn request(endpoint: Option<&str>) -> UploadRequest {
        let config = CosConfig {
            secret_id: "AKIDexample1234567890".to_string(),
            secret_key: "secret-key-value".to_string(),
            region: "ap-guangzhou".to_string(),
            bucket: "artifacts-1250000000".to_string(),
            endpoint: endpoint.map(str::to_string),
        };
        UploadRequest::new(config, "build/app.tar.gz", "releases/app.tar.gz").unwrap()
    }

    #[tokio::test]
    async fn test_default_endpoint() {
        let client = CosClient::new(&request(None)).await.unwrap();
        assert_eq!(client.endpoint(), "https://cos.ap-guangzhou.myqcloud.com");
    }

    #[tokio::test]
    async fn test_http_endpoint_rejected() {
        let result = CosClient::new(&request(Some("http://127.0.0.1:9000"))).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_presigned_url_shape() {
        let req = request(None);
        let client = CosClient::new(&req).await.unwrap();

        let url = client
            .presign_get(&req.target(), Duration::from_secs(600))
            .await
            .unwrap();

        assert!(
            url.starts_with(
                "https://artifacts-1250000000.cos.ap-guangzhou.myqcloud.com/releases/app.tar.gz?"
            ),
            "unexpected url: {url}"
        );
        assert!(url.contains("X-Amz-Expires=600"));
        assert!(url.contains("X-Amz-Signature="));
        assert!(url.contains("AKIDexample1234567890"));
        assert!(!url.contains("secret-key-value"));
    }

    #[tokio::test]
    async fn test_presign_rejects_overlong_expiry() {
        let req = request(None);
        let client = CosClient::new(&req).await.unwrap();

        // SigV4 caps presigned URLs at one week
        let result = client
            .presign_get(&req.target(), Duration::from_secs(8 * 24 * 3600))
            .await;
        assert!(matches!(result, Err(Error::Signing(_))));
    }

    #[tokio::test]
    async fn test_put_missing_file_fails_before_request() {
        let req = request(None);
        let client = CosClient::new(&req).await.unwrap();
        let dir = tempfile::tempdir().unwrap();

        let result = client
            .put_file(&req.target(), &dir.path().join("missing.bin"), None)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Upload(_)));
        assert!(err.to_string().contains("missing.bin"));
    }
}
