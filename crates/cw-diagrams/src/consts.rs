//! Internal constants for diagram rendering.

use std::time::Duration;

/// Default timeout for a single external command (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How often a running command is polled for completion.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Default layout command; the source file path is appended.
pub const DEFAULT_LAYOUT_COMMAND: &[&str] = &["dot", "-Tpng"];

/// Default encoder command; the layout output file path is appended.
pub const DEFAULT_ENCODE_COMMAND: &[&str] = &["base64"];

/// Classes that mark a code block as a diagram by default.
pub const DEFAULT_CLASSES: &[&str] = &["dot", "graphviz"];

/// Media type of the layout command output.
pub const DEFAULT_MEDIA_TYPE: &str = "image/png";
