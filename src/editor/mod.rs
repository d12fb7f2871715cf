//! Editor integration boundary
//!
//! The editor reports snapshots as [`EditorEvent`]s and receives a small set
//! of commands through [`EditorHost`]. The binary speaks a JSON-lines
//! protocol over stdio (see [`protocol`]); tests use recording hosts.

pub mod event;
pub mod protocol;

pub use event::{CompletedItem, EditorEvent, Selection};
pub use protocol::{parse_event, HostCommand, StdioHost};

use crate::Result;

/// Editor global variable that mirrors the cursor suppression flag
pub const IGNORE_CURSOR_VAR: &str = "ignorecursorevent";

/// Editor variable that receives captured command output
pub const OUTPUT_VAR: &str = "nvsr_outvar";

/// Commands the speech layer issues to the editor
pub trait EditorHost {
    /// Set or clear the "ignore next cursor event" flag
    fn set_ignore_cursor_event(&mut self, ignore: bool) -> Result<()>;

    /// Start redirecting command output into `var`
    fn begin_capture(&mut self, var: &str) -> Result<()>;

    /// Stop redirecting command output
    fn end_capture(&mut self) -> Result<()>;
}
