use serde::{Deserialize, Serialize};

/// Snapshot of the text field as the binding layer sees it: the displayed
/// text plus the selection range, both measured in display positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub value:        String,
    pub cursor_start: usize,
    pub cursor_end:   usize,
}

impl FieldState {
    /// Creates a state with a collapsed selection at `cursor`
    pub fn new(value: impl Into<String>, cursor: usize) -> Self {
        Self {
            value:        value.into(),
            cursor_start: cursor,
            cursor_end:   cursor,
        }
    }

    /// Returns the caret position (start of the selection)
    pub const fn cursor(&self) -> usize {
        self.cursor_start
    }

    /// Returns a copy with the selection collapsed to `pos`
    #[must_use]
    pub fn with_cursor(&self, pos: usize) -> Self {
        Self {
            value:        self.value.clone(),
            cursor_start: pos,
            cursor_end:   pos,
        }
    }

    /// Returns true when nothing is selected
    pub const fn is_collapsed(&self) -> bool {
        self.cursor_start == self.cursor_end
    }
}
