//! upload - Publish an artifact and its signed URL
//!
//! Reads the COS configuration from the environment, uploads the file, presigns
//! a GET URL and hands it to the CI output sink.

use std::path::PathBuf;

use clap::Args;
use cos_upload_core::{CosConfig, ObjectStore, Result, UploadRequest, Uploader, mask_secret};
use cos_upload_s3::CosClient;
use tracing::debug;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, OutputSink};

/// Upload arguments
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Local file to upload
    pub local_file: PathBuf,

    /// Object key in the bucket (e.g. releases/app.tar.gz)
    #[arg(allow_hyphen_values = true)]
    pub remote_path: String,
}

/// Execute the upload
pub async fn execute(args: UploadArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let outcome = match prepare(args, &formatter) {
        Ok((request, sink)) => match CosClient::new(&request).await {
            Ok(client) => publish(client, &request, &sink, &formatter).await,
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    finish(outcome, &formatter)
}

/// Build the request and pick the sink from the process environment
fn prepare(args: UploadArgs, formatter: &Formatter) -> Result<(UploadRequest, OutputSink)> {
    let config = CosConfig::from_env()?;

    debug!(bucket = %config.bucket, region = %config.region, "Loaded COS configuration");
    debug!(secret_id = %mask_secret(&config.secret_id), "Using static credentials");

    let sink = OutputSink::from_env(formatter.is_json());
    let request = UploadRequest::new(config, args.local_file, args.remote_path)?;
    Ok((request, sink))
}

/// Upload, sign and publish through the given store
pub async fn publish<S: ObjectStore>(
    store: S,
    request: &UploadRequest,
    sink: &OutputSink,
    formatter: &Formatter,
) -> Result<()> {
    formatter.status(&format!(
        "Uploading {} to {}...",
        request.local_path.display(),
        request.remote_key
    ));

    let result = Uploader::new(store).upload_and_sign(request).await?;
    sink.publish(&result)?;

    match result.expires_at() {
        Some(expires_at) => formatter.success(&format!(
            "Published URL for {} (expires {expires_at})",
            request.target()
        )),
        None => formatter.success(&format!("Published URL for {}", request.target())),
    }

    Ok(())
}

/// Report the outcome and map it to an exit code
pub fn finish(outcome: Result<()>, formatter: &Formatter) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            formatter.error(&e.to_string());
            if e.object_uploaded() {
                formatter.warning(
                    "The object was uploaded but its URL was not published. Re-run to overwrite it.",
                );
            }
            ExitCode::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cos_upload_core::{Error, RemotePath, UploadedObject};
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Store that records calls and signs with a fixed fake signature
    #[derive(Clone, Default)]
    struct FakeStore {
        calls: Arc<Mutex<Vec<String>>>,
        fail_upload: bool,
        fail_presign: bool,
    }

    #[async_trait]
    impl ObjectStore for FakeStore {
        async fn put_file(
            &self,
            target: &RemotePath,
            _local_path: &Path,
            _content_type: Option<&'static str>,
        ) -> Result<UploadedObject> {
            self.calls.lock().unwrap().push(format!("put {}", target.key));
            if self.fail_upload {
                return Err(Error::Upload("AccessDenied".into()));
            }
            Ok(UploadedObject::default())
        }

        async fn presign_get(&self, target: &RemotePath, expires_in: Duration) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("presign {} {}", target.key, expires_in.as_secs()));
            if self.fail_presign {
                return Err(Error::Signing("SignatureDoesNotMatch".into()));
            }
            Ok(format!(
                "https://{}.cos.ap-guangzhou.myqcloud.com/{}?X-Amz-Expires={}&X-Amz-Signature=fake",
                target.bucket,
                target.key,
                expires_in.as_secs()
            ))
        }
    }

    fn quiet() -> Formatter {
        Formatter::new(OutputConfig {
            quiet: true,
            no_color: true,
            ..Default::default()
        })
    }

    /// Local `build/app.tar.gz` inside a temp dir, plus a step output path
    fn fixture() -> (tempfile::TempDir, UploadRequest, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("build");
        std::fs::create_dir(&build).unwrap();
        let artifact = build.join("app.tar.gz");
        std::fs::write(&artifact, b"artifact bytes").unwrap();

        let config = CosConfig {
            secret_id: "AKIDexample1234567890".to_string(),
            secret_key: "secret-key-value".to_string(),
            region: "ap-guangzhou".to_string(),
            bucket: "artifacts-1250000000".to_string(),
            endpoint: None,
        };
        let request = UploadRequest::new(config, artifact, "releases/app.tar.gz").unwrap();
        let gh_output = dir.path().join("github_output");
        (dir, request, gh_output)
    }

    #[tokio::test]
    async fn test_publish_writes_url_line() {
        let (_dir, request, gh_output) = fixture();
        let store = FakeStore::default();
        let calls = store.calls.clone();
        let formatter = quiet();

        let outcome = publish(store, &request, &OutputSink::File(gh_output.clone()), &formatter).await;

        assert_eq!(finish(outcome, &formatter), ExitCode::Success);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                "put releases/app.tar.gz".to_string(),
                "presign releases/app.tar.gz 600".to_string(),
            ]
        );
        assert_eq!(
            std::fs::read_to_string(&gh_output).unwrap(),
            "url=https://artifacts-1250000000.cos.ap-guangzhou.myqcloud.com/releases/app.tar.gz\
             ?X-Amz-Expires=600&X-Amz-Signature=fake\n"
        );
    }

    #[tokio::test]
    async fn test_upload_failure_exits_1_without_signing() {
        let (_dir, request, gh_output) = fixture();
        let store = FakeStore {
            fail_upload: true,
            ..Default::default()
        };
        let calls = store.calls.clone();
        let formatter = quiet();

        let outcome = publish(store, &request, &OutputSink::File(gh_output.clone()), &formatter).await;

        assert!(matches!(outcome, Err(Error::Upload(_))));
        assert_eq!(finish(outcome, &formatter), ExitCode::Failure);
        assert_eq!(*calls.lock().unwrap(), vec!["put releases/app.tar.gz".to_string()]);
        assert!(!gh_output.exists());
    }

    #[tokio::test]
    async fn test_signing_failure_exits_1_with_object_uploaded() {
        let (_dir, request, gh_output) = fixture();
        let store = FakeStore {
            fail_presign: true,
            ..Default::default()
        };
        let formatter = quiet();

        let outcome = publish(store, &request, &OutputSink::File(gh_output.clone()), &formatter).await;

        let err = outcome.as_ref().unwrap_err();
        assert!(matches!(err, Error::Signing(_)));
        assert!(err.object_uploaded());
        assert_eq!(finish(outcome, &formatter), ExitCode::Failure);
        assert!(!gh_output.exists());
    }

    #[tokio::test]
    async fn test_unwritable_output_exits_1_with_object_uploaded() {
        let (dir, request, _) = fixture();
        let gh_output = dir.path().join("no-such-dir").join("github_output");
        let formatter = quiet();

        let outcome = publish(
            FakeStore::default(),
            &request,
            &OutputSink::File(gh_output),
            &formatter,
        )
        .await;

        let err = outcome.as_ref().unwrap_err();
        assert!(matches!(err, Error::Output(_)));
        assert!(err.object_uploaded());
        assert_eq!(finish(outcome, &formatter), ExitCode::Failure);
    }
}
