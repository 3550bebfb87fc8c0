//! Environment configuration
//!
//! Credentials and bucket coordinates come from the process environment.
//! They are read once at startup into a [`CosConfig`] that is then passed by
//! value, so nothing below the CLI touches the environment again.

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// Access key ID
pub const ENV_SECRET_ID: &str = "TENCENT_SECRET_ID";

/// Access key secret
pub const ENV_SECRET_KEY: &str = "TENCENT_SECRET_KEY";

/// Bucket region, e.g. `ap-guangzhou`
pub const ENV_REGION: &str = "COS_REGION";

/// Bucket name including the app id suffix
pub const ENV_BUCKET: &str = "COS_BUCKET";

/// Optional endpoint override
pub const ENV_ENDPOINT: &str = "COS_ENDPOINT";

/// Required variables in the order they are reported when missing
pub const REQUIRED_VARS: [&str; 4] = [ENV_SECRET_ID, ENV_SECRET_KEY, ENV_REGION, ENV_BUCKET];

/// Storage configuration read from the environment
#[derive(Clone, PartialEq, Eq)]
pub struct CosConfig {
    pub secret_id: String,
    pub secret_key: String,
    pub region: String,
    pub bucket: String,
    /// Endpoint override; the regional COS endpoint is used when absent
    pub endpoint: Option<String>,
}

impl CosConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary lookup function
    ///
    /// Empty values count as missing. The error names every missing variable,
    /// not just the first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| get(name).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "Missing environment variables: {}",
                missing.join(", ")
            )));
        }

        let config = Self {
            secret_id: get(ENV_SECRET_ID).unwrap_or_default(),
            secret_key: get(ENV_SECRET_KEY).unwrap_or_default(),
            region: get(ENV_REGION).unwrap_or_default(),
            bucket: get(ENV_BUCKET).unwrap_or_default(),
            endpoint: get(ENV_ENDPOINT),
        };

        // Fail on a bad override now rather than at client construction
        config.endpoint_url()?;

        Ok(config)
    }

    /// Endpoint the storage client should talk to
    ///
    /// Defaults to `https://cos.<region>.myqcloud.com`. Only HTTPS is accepted.
    pub fn endpoint_url(&self) -> Result<Url> {
        endpoint_url(&self.region, self.endpoint.as_deref())
    }
}

impl fmt::Debug for CosConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosConfig")
            .field("secret_id", &mask_secret(&self.secret_id))
            .field("secret_key", &"***")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Resolve the endpoint URL for a region and optional override
pub fn endpoint_url(region: &str, endpoint: Option<&str>) -> Result<Url> {
    let raw = match endpoint {
        Some(e) => e.to_string(),
        None => format!("https://cos.{region}.myqcloud.com"),
    };

    let url = Url::parse(&raw)?;
    if url.scheme() != "https" {
        return Err(Error::Config(format!(
            "Endpoint must use https, got '{}'",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Mask a secret for log output, keeping the first and last four characters
///
/// Secrets of eight characters or fewer are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}
