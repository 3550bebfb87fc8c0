//! CI output sink
//!
//! GitHub Actions reads step outputs from the file named by `GITHUB_OUTPUT`,
//! one `key=value` per line. Outside Actions the URL falls back to the older
//! `::set-output` workflow command on stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use cos_upload_core::{Error, Result, SignedUrlResult};

/// Environment variable naming the step output file
pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Name of the published output
const OUTPUT_NAME: &str = "url";

/// Where the signed URL is published
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Append `url=<value>` to the step output file
    File(PathBuf),
    /// Print the legacy workflow command (or JSON) on stdout
    Stdout { json: bool },
}

impl OutputSink {
    /// Pick the sink from the process environment
    pub fn from_env(json: bool) -> Self {
        Self::from_lookup(|name| std::env::var(name).ok(), json)
    }

    /// Pick the sink through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F, json: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ENV_GITHUB_OUTPUT).filter(|v| !v.is_empty()) {
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::Stdout { json },
        }
    }

    /// Publish the result
    pub fn publish(&self, result: &SignedUrlResult) -> Result<()> {
        match self {
            Self::File(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| Error::Output(format!("{}: {e}", path.display())))?;
                writeln!(file, "{}", output_line(&result.url))
                    .map_err(|e| Error::Output(format!("{}: {e}", path.display())))?;
            }
            Self::Stdout { json } => {
                let mut stdout = std::io::stdout().lock();
                write_stdout(&mut stdout, result, *json)?;
            }
        }
        Ok(())
    }
}

fn write_stdout<W: Write>(out: &mut W, result: &SignedUrlResult, json: bool) -> Result<()> {
    let line = if json {
        serde_json::to_string(result).map_err(|e| Error::Output(e.to_string()))?
    } else {
        legacy_output_line(&result.url)
    };
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

/// `url=<value>` line for the step output file
pub fn output_line(url: &str) -> String {
    format!("{OUTPUT_NAME}={url}")
}

/// `::set-output name=url::<value>` workflow command
pub fn legacy_output_line(url: &str) -> String {
    format!("::set-output name={OUTPUT_NAME}::{url}")
}
