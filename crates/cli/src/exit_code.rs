//! Exit code definitions for cos-upload
//!
//! CI steps only distinguish success from failure, so every error maps to 1.
//! Changing these values breaks pipelines that call the tool.

/// Exit codes for the cos-upload binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Artifact uploaded and URL published
    Success = 0,

    /// Usage, configuration, upload, signing or output failure
    Failure = 1,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}
