//! JSON-lines host protocol
//!
//! The editor side writes one [`EditorEvent`] per line to our stdin. Editor
//! commands go back as one [`HostCommand`] per line on stdout:
//!
//! ```text
//! {"command":"set_var","name":"ignorecursorevent","value":true}
//! {"command":"redir_start","var":"nvsr_outvar"}
//! {"command":"redir_end"}
//! ```

use super::{EditorEvent, EditorHost, IGNORE_CURSOR_VAR};
use crate::{NvsrError, Result};
use log::debug;
use serde::Serialize;
use std::io::Write;

/// Outbound editor command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    /// Set an editor global variable
    SetVar {
        name: String,
        value: serde_json::Value,
    },
    /// Begin `:redir => var`
    RedirStart { var: String },
    /// `:redir END`
    RedirEnd,
}

/// Parse one inbound protocol line
pub fn parse_event(line: &str) -> Result<EditorEvent> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Editor host that writes commands as JSON lines
pub struct StdioHost<W: Write> {
    out: W,
}

impl<W: Write> StdioHost<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one command and flush it
    pub fn send(&mut self, command: &HostCommand) -> Result<()> {
        debug!("Host command: {:?}", command);
        let line = serde_json::to_string(command)?;
        writeln!(self.out, "{}", line)
            .and_then(|_| self.out.flush())
            .map_err(|e| NvsrError::Host(format!("Failed to write command: {}", e)))
    }

    #[cfg(test)]
    fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> EditorHost for StdioHost<W> {
    fn set_ignore_cursor_event(&mut self, ignore: bool) -> Result<()> {
        self.send(&HostCommand::SetVar {
            name: IGNORE_CURSOR_VAR.to_string(),
            value: serde_json::Value::Bool(ignore),
        })
    }

    fn begin_capture(&mut self, var: &str) -> Result<()> {
        self.send(&HostCommand::RedirStart {
            var: var.to_string(),
        })
    }

    fn end_capture(&mut self) -> Result<()> {
        self.send(&HostCommand::RedirEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{CompletedItem, OUTPUT_VAR};

    #[test]
    fn test_parse_cursor_moved() {
        let event = parse_event(r#"{"event":"cursor_moved","line":"hello","row":1,"col":4}"#)
            .unwrap();
        assert_eq!(
            event,
            EditorEvent::CursorMoved {
                line: "hello".to_string(),
                row: 1,
                col: 4
            }
        );
    }

    #[test]
    fn test_parse_unit_and_defaulted_events() {
        assert_eq!(
            parse_event(r#"{"event":"cmdline_enter"}"#).unwrap(),
            EditorEvent::CmdlineEnter
        );
        assert_eq!(
            parse_event(r#"{"event":"cmdline_leave"}"#).unwrap(),
            EditorEvent::CmdlineLeave { output: None }
        );
        assert_eq!(
            parse_event(r#"{"event":"complete_done","item":{"word":"foo"}}"#).unwrap(),
            EditorEvent::CompleteDone {
                item: Some(CompletedItem::Record {
                    word: "foo".to_string()
                })
            }
        );
        assert_eq!(
            parse_event(r#"{"event":"insert_char_pre","char":";","col":4,"line":"foo"}"#)
                .unwrap(),
            EditorEvent::InsertCharPre {
                ch: ";".to_string(),
                col: 4,
                line: "foo".to_string()
            }
        );
    }

    #[test]
    fn test_parse_session_start() {
        assert_eq!(
            parse_event(r#"{"event":"session_start","line":"fn main()","row":3,"col":1}"#)
                .unwrap(),
            EditorEvent::SessionStart {
                line: "fn main()".to_string(),
                row: 3,
                col: 1
            }
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_event("not json").is_err());
        assert!(parse_event(r#"{"event":"no_such_event"}"#).is_err());
        assert!(parse_event(r#"{"event":"cursor_moved","row":1}"#).is_err());
    }

    #[test]
    fn test_commands_written_as_lines() {
        let mut host = StdioHost::new(Vec::new());
        host.set_ignore_cursor_event(true).unwrap();
        host.begin_capture(OUTPUT_VAR).unwrap();
        host.end_capture().unwrap();

        let written = String::from_utf8(host.get_ref().clone()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"command":"set_var","name":"ignorecursorevent","value":true}"#,
                r#"{"command":"redir_start","var":"nvsr_outvar"}"#,
                r#"{"command":"redir_end"}"#,
            ]
        );
    }
}
