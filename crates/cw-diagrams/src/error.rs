//! Error types for external command invocation.

use std::io;
use std::time::Duration;

/// Failure of an external command run through [`pipe`](crate::pipe).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PipeError {
    /// No program was configured.
    #[error("empty command")]
    EmptyCommand,

    /// The program could not be started (usually: not installed).
    #[error("failed to start `{program}`")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// The program exited unsuccessfully.
    #[error("`{program}` {}: {stderr}", describe_exit(.code))]
    Status {
        /// Program name.
        program: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The program ran past its deadline and was killed.
    #[error("`{program}` timed out after {}ms", .timeout.as_millis())]
    Timeout {
        /// Program name.
        program: String,
        /// Deadline that was exceeded.
        timeout: Duration,
    },

    /// The program succeeded but printed nothing.
    #[error("`{program}` produced no output")]
    EmptyOutput {
        /// Program name.
        program: String,
    },

    /// Temporary file or pipe I/O failed.
    #[error("I/O error")]
    Io(#[from] io::Error),

    /// A stdout/stderr reader thread panicked.
    #[error("output reader thread panicked")]
    ReaderPanicked,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_owned(),
    }
}
