//! Footnote accumulation for a single document render.

/// Ordered, append-only list of rendered footnote bodies.
///
/// Ordinals start at 1 and are assigned at the moment a note is added, so
/// they follow the order in which notes are encountered.
#[derive(Debug, Default)]
pub struct Footnotes {
    entries: Vec<String>,
}

impl Footnotes {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note and return its ordinal.
    ///
    /// `render` receives the ordinal so the stored entry can carry anchors
    /// that refer to it.
    pub fn add_with(&mut self, render: impl FnOnce(usize) -> String) -> usize {
        let ordinal = self.entries.len() + 1;
        self.entries.push(render(ordinal));
        ordinal
    }

    /// All entries in ordinal order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of notes added so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no note has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
