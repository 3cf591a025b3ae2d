//! Two-stage diagram pipeline: layout, then encode.

use std::time::Duration;

use cw_ast::Attributes;
use tracing::debug;

use crate::consts::{
    DEFAULT_CLASSES, DEFAULT_ENCODE_COMMAND, DEFAULT_LAYOUT_COMMAND, DEFAULT_MEDIA_TYPE,
    DEFAULT_TIMEOUT,
};
use crate::error::PipeError;
use crate::pipe::pipe;

/// Converts a textual graph description into a `data:` URI.
///
/// The source is piped through the layout command (default `dot -Tpng`) and
/// the resulting image through the encoder (default `base64`). Each stage is
/// a separate [`pipe`] call with its own temporary file and deadline.
///
/// # Configuration
///
/// Builder methods override the defaults:
/// - [`layout_command`](Self::layout_command)
/// - [`encode_command`](Self::encode_command)
/// - [`timeout`](Self::timeout)
/// - [`classes`](Self::classes)
#[derive(Debug, Clone)]
pub struct DiagramPipeline {
    layout_command: Vec<String>,
    encode_command: Vec<String>,
    timeout: Duration,
    classes: Vec<String>,
    media_type: String,
}

impl DiagramPipeline {
    /// Create a pipeline with the default commands.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layout_command: owned(DEFAULT_LAYOUT_COMMAND),
            encode_command: owned(DEFAULT_ENCODE_COMMAND),
            timeout: DEFAULT_TIMEOUT,
            classes: owned(DEFAULT_CLASSES),
            media_type: DEFAULT_MEDIA_TYPE.to_owned(),
        }
    }

    /// Set the layout command (program plus fixed arguments).
    #[must_use]
    pub fn layout_command(mut self, command: Vec<String>) -> Self {
        self.layout_command = command;
        self
    }

    /// Set the encoder command (program plus fixed arguments).
    #[must_use]
    pub fn encode_command(mut self, command: Vec<String>) -> Self {
        self.encode_command = command;
        self
    }

    /// Set the per-command timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the code block classes that select this pipeline.
    #[must_use]
    pub fn classes(mut self, classes: Vec<String>) -> Self {
        self.classes = classes;
        self
    }

    /// Set the media type written into the `data:` URI.
    #[must_use]
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    /// Whether a code block with these attributes is a diagram.
    pub fn matches(&self, attrs: &Attributes) -> bool {
        attrs
            .classes()
            .any(|class| self.classes.iter().any(|c| c == class))
    }

    /// Render `source` and return a self-contained `data:` URI.
    pub fn render(&self, source: &str) -> Result<String, PipeError> {
        let image = pipe(&self.layout_command, source.as_bytes(), self.timeout)?;
        debug!(bytes = image.len(), "diagram layout finished");

        let encoded = pipe(&self.encode_command, &image, self.timeout)?;
        // Encoders wrap their output at fixed columns.
        let payload: String = String::from_utf8_lossy(&encoded)
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        if payload.is_empty() {
            return Err(PipeError::EmptyOutput {
                program: self.encode_command.first().cloned().unwrap_or_default(),
            });
        }

        Ok(format!("data:{};base64,{payload}", self.media_type))
    }
}

impl Default for DiagramPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn owned(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|&part| part.to_owned()).collect()
}
