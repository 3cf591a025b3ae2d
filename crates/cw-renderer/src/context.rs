//! Render-scoped state shared by the handlers of one document.

use std::fmt;

use cw_ast::NodeKind;

use crate::footnotes::Footnotes;

/// Something that went wrong locally while rendering a document.
///
/// The render still completes; the node in question produced no output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Kind of the node that produced nothing.
    pub kind: NodeKind,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// State owned by a single document render.
///
/// Created fresh by [`DocumentRenderer::render`](crate::DocumentRenderer::render)
/// and dropped when it returns, so footnotes and figure numbers never leak
/// from one document into the next.
#[derive(Debug, Default)]
pub struct RenderContext {
    footnotes: Footnotes,
    figures: usize,
    diagnostics: Vec<Diagnostic>,
}

impl RenderContext {
    /// Create empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Footnotes collected so far.
    pub fn footnotes(&self) -> &Footnotes {
        &self.footnotes
    }

    /// Mutable access for the note handler.
    pub fn footnotes_mut(&mut self) -> &mut Footnotes {
        &mut self.footnotes
    }

    /// Advance the figure counter and return the new figure number.
    pub fn next_figure(&mut self) -> usize {
        self.figures += 1;
        self.figures
    }

    /// Record a local failure.
    pub fn report(&mut self, kind: NodeKind, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            kind,
            message: message.into(),
        });
    }

    /// Take the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
