//! CLI definition and execution

use clap::Parser;

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

pub mod upload;

/// cos-upload - publish a build artifact to Tencent COS
///
/// Uploads a local file to the bucket named by COS_BUCKET and publishes a
/// presigned download URL, valid for 10 minutes, as the `url` step output.
#[derive(Parser, Debug)]
#[command(name = "cos-upload")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub upload: upload::UploadArgs,

    /// Print the result as JSON when writing to stdout
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    upload::execute(cli.upload, output_config).await
}
