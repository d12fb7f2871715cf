//! Cursor and edit state tracking
//!
//! Remembers where the cursor was and what the line looked like, so each
//! cursor event can be classified as a move within an unchanged line (speak
//! one character) or anything else (speak the line). Also holds the one-shot
//! flag that swallows the cursor event caused by a delete or yank.

use log::{debug, warn};

/// Last observed cursor state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorSnapshot {
    /// 1-based line number
    pub row: usize,
    /// 1-based character column
    pub col: usize,
    /// Text of the cursor line
    pub line: String,
}

impl CursorSnapshot {
    pub fn new(row: usize, col: usize, line: impl Into<String>) -> Self {
        Self {
            row,
            col,
            line: line.into(),
        }
    }

    /// Character under the cursor, empty past the end of the line
    pub fn char_at_cursor(&self) -> String {
        self.col
            .checked_sub(1)
            .and_then(|idx| self.line.chars().nth(idx))
            .map(String::from)
            .unwrap_or_default()
    }
}

/// What a cursor event should announce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorAnnouncement {
    /// The move was caused by an edit that was already spoken
    Suppressed,
    /// Horizontal move on an unchanged line
    Character(String),
    /// New row or changed line
    Line(String),
}

/// Cursor snapshot plus the pending suppression flag
#[derive(Debug, Default)]
pub struct CursorTracker {
    snapshot: CursorSnapshot,
    suppress_next: bool,
}

impl CursorTracker {
    pub fn new(snapshot: CursorSnapshot) -> Self {
        Self {
            snapshot,
            suppress_next: false,
        }
    }

    pub fn snapshot(&self) -> &CursorSnapshot {
        &self.snapshot
    }

    pub fn is_suppressing(&self) -> bool {
        self.suppress_next
    }

    /// Swallow the next cursor event
    ///
    /// Only one suppression can be pending. A second edit before the cursor
    /// moves is logged and collapses into the first.
    pub fn suppress_next(&mut self) {
        if self.suppress_next {
            warn!("Cursor suppression already pending; second edit collapses into it");
        }
        self.suppress_next = true;
    }

    /// Record a cursor move and decide what to speak
    ///
    /// The snapshot is always replaced, including when the event is
    /// suppressed.
    pub fn cursor_moved(&mut self, next: CursorSnapshot) -> CursorAnnouncement {
        let previous = std::mem::replace(&mut self.snapshot, next);

        if std::mem::take(&mut self.suppress_next) {
            debug!("Cursor event suppressed after edit");
            return CursorAnnouncement::Suppressed;
        }

        if self.snapshot.row == previous.row && self.snapshot.line == previous.line {
            CursorAnnouncement::Character(self.snapshot.char_at_cursor())
        } else {
            CursorAnnouncement::Line(self.snapshot.line.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_move_speaks_character() {
        let mut tracker = CursorTracker::new(CursorSnapshot::new(1, 3, "hello"));
        let announcement = tracker.cursor_moved(CursorSnapshot::new(1, 4, "hello"));
        assert_eq!(announcement, CursorAnnouncement::Character("l".to_string()));
        assert_eq!(tracker.snapshot().col, 4);
    }

    #[test]
    fn test_row_change_speaks_line() {
        let mut tracker = CursorTracker::new(CursorSnapshot::new(1, 1, "hello"));
        let announcement = tracker.cursor_moved(CursorSnapshot::new(2, 1, "world"));
        assert_eq!(announcement, CursorAnnouncement::Line("world".to_string()));
    }

    #[test]
    fn test_changed_line_speaks_line() {
        // Same row but the text changed under the cursor
        let mut tracker = CursorTracker::new(CursorSnapshot::new(1, 2, "helo"));
        let announcement = tracker.cursor_moved(CursorSnapshot::new(1, 3, "hello"));
        assert_eq!(announcement, CursorAnnouncement::Line("hello".to_string()));
    }

    #[test]
    fn test_suppression_is_one_shot() {
        let mut tracker = CursorTracker::new(CursorSnapshot::new(1, 1, "foo bar"));
        tracker.suppress_next();
        assert!(tracker.is_suppressing());

        let announcement = tracker.cursor_moved(CursorSnapshot::new(1, 1, "bar"));
        assert_eq!(announcement, CursorAnnouncement::Suppressed);
        assert!(!tracker.is_suppressing());
        assert_eq!(tracker.snapshot(), &CursorSnapshot::new(1, 1, "bar"));

        let announcement = tracker.cursor_moved(CursorSnapshot::new(2, 1, "next"));
        assert_eq!(announcement, CursorAnnouncement::Line("next".to_string()));
    }

    #[test]
    fn test_double_suppression_collapses() {
        let mut tracker = CursorTracker::default();
        tracker.suppress_next();
        tracker.suppress_next();
        assert_eq!(
            tracker.cursor_moved(CursorSnapshot::new(1, 1, "a")),
            CursorAnnouncement::Suppressed
        );
        assert_ne!(
            tracker.cursor_moved(CursorSnapshot::new(2, 1, "b")),
            CursorAnnouncement::Suppressed
        );
    }

    #[test]
    fn test_char_at_cursor_bounds() {
        assert_eq!(CursorSnapshot::new(1, 0, "abc").char_at_cursor(), "");
        assert_eq!(CursorSnapshot::new(1, 3, "abc").char_at_cursor(), "c");
        assert_eq!(CursorSnapshot::new(1, 4, "abc").char_at_cursor(), "");
        assert_eq!(CursorSnapshot::new(1, 2, "héllo").char_at_cursor(), "é");
    }
}
