//! Inbound editor events

use serde::Deserialize;

/// One editor event with the snapshot it needs
///
/// Serialized with an `"event"` tag, e.g.
/// `{"event":"cursor_moved","line":"hello","row":1,"col":4}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Cursor position when the session attaches
    SessionStart { line: String, row: usize, col: usize },

    /// Cursor moved in normal or insert mode (1-based row and char column)
    CursorMoved { line: String, row: usize, col: usize },

    /// Text was yanked or deleted
    TextYankPost {
        operator: String,
        #[serde(default)]
        regcontents: Vec<String>,
    },

    /// A character is about to be inserted at `col` (1-based char column)
    InsertCharPre {
        #[serde(rename = "char")]
        ch: String,
        col: usize,
        line: String,
    },

    /// Insert-mode completion finished
    CompleteDone {
        #[serde(default)]
        item: Option<CompletedItem>,
    },

    /// Command line opened
    CmdlineEnter,

    /// Command line closed; `output` is the captured text with NUL line breaks
    CmdlineLeave {
        #[serde(default)]
        output: Option<String>,
    },

    InsertEnter,
    InsertLeave,

    /// Buffer indentation settings changed
    IndentSettings { expandtab: bool, shiftwidth: usize },

    /// An editor global variable overrides an option
    SetOption {
        name: String,
        value: serde_json::Value,
    },

    /// Speak arbitrary text
    Speak { text: String },

    /// Speak the current line
    SpeakLine { line: String },

    /// Speak the current line slowly with brackets named
    SpeakLineDetail { line: String },

    /// Speak each line of the visual selection
    SpeakRange { selection: Selection },

    /// Speak each line of the visual selection slowly with brackets named
    SpeakRangeDetail { selection: Selection },

    /// Speak a description produced by the code explainer
    SpeakExplanation { text: String },

    /// Turn speech output on or off
    ToggleSpeech,
}

/// A completion item: either a full record or a bare word
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CompletedItem {
    Word(String),
    Record {
        #[serde(default)]
        word: String,
    },
}

impl CompletedItem {
    /// Text to speak for this item
    pub fn label(&self) -> &str {
        match self {
            CompletedItem::Word(word) => word,
            CompletedItem::Record { word } => word,
        }
    }
}

/// Lines between the `<` and `>` marks with the mark byte columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Selection {
    pub lines: Vec<String>,
    pub start_col: usize,
    pub end_col: usize,
}

impl Selection {
    /// Selected text, one entry per line
    ///
    /// A single line is cut to `start_col..end_col`; otherwise the first line
    /// starts at `start_col` and the last line stops at `end_col`.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = self.lines.clone();

        match lines.len() {
            0 => {}
            1 => lines[0] = slice_line(&lines[0], self.start_col, Some(self.end_col)),
            n => {
                lines[0] = slice_line(&lines[0], self.start_col, None);
                lines[n - 1] = slice_line(&lines[n - 1], 0, Some(self.end_col));
            }
        }

        lines
    }
}

/// Byte slice clamped to the line and rounded down to char boundaries
fn slice_line(line: &str, start: usize, end: Option<usize>) -> String {
    let floor = |mut idx: usize| {
        idx = idx.min(line.len());
        while !line.is_char_boundary(idx) {
            idx -= 1;
        }
        idx
    };

    let start = floor(start);
    let end = floor(end.unwrap_or(line.len()));
    if start >= end {
        return String::new();
    }
    line[start..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_selection() {
        let selection = Selection {
            lines: vec!["let x = 1;".to_string()],
            start_col: 4,
            end_col: 5,
        };
        assert_eq!(selection.text_lines(), vec!["x"]);
    }

    #[test]
    fn test_multi_line_selection() {
        let selection = Selection {
            lines: vec!["fn main() {".to_string(), "    x();".to_string(), "}".to_string()],
            start_col: 3,
            end_col: 1,
        };
        assert_eq!(selection.text_lines(), vec!["main() {", "    x();", "}"]);
    }

    #[test]
    fn test_selection_clamps_columns() {
        let selection = Selection {
            lines: vec!["héllo".to_string()],
            start_col: 2,
            end_col: 99,
        };
        // Byte 2 is inside 'é', rounded down to its start
        assert_eq!(selection.text_lines(), vec!["éllo"]);

        assert!(Selection::default().text_lines().is_empty());
    }

    #[test]
    fn test_completed_item_label() {
        let item: CompletedItem = serde_json::from_str(r#"{"word":"println","kind":"f"}"#).unwrap();
        assert_eq!(item.label(), "println");

        let item: CompletedItem = serde_json::from_str(r#""foo""#).unwrap();
        assert_eq!(item.label(), "foo");

        let item: CompletedItem = serde_json::from_str("{}").unwrap();
        assert_eq!(item.label(), "");
    }
}
