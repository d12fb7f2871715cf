//! Concrete speech engines

// Screen reader output service via the tts crate
pub mod service;

// espeak command line synthesizer
pub mod espeak;

// macOS `say` command line synthesizer
pub mod say;

use crate::{NvsrError, Result};
use log::{debug, error};
use std::process::{Child, Command, Stdio};

/// Synthesizer processes that have been spawned and not yet reaped
///
/// Command line backends never wait on their children. Finished ones are
/// collected on the next dispatch.
#[derive(Default)]
pub struct Utterances {
    running: Vec<Child>,
}

impl Utterances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start one synthesizer process and keep its handle
    pub fn spawn(&mut self, program: &str, args: &[String]) -> Result<()> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        match cmd.spawn() {
            Ok(child) => {
                debug!("{} process started (pid {})", program, child.id());
                self.running.push(child);
                Ok(())
            }
            Err(e) => {
                error!("Failed to spawn {}: {}", program, e);
                Err(NvsrError::BackendUnavailable(format!(
                    "Failed to start {}: {}",
                    program, e
                )))
            }
        }
    }

    /// Drop handles of processes that have exited
    pub fn reap(&mut self) {
        self.running
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }

    /// Kill every process still speaking
    pub fn cancel_all(&mut self) {
        for mut child in self.running.drain(..) {
            debug!("Killing synthesizer process {}", child.id());
            match child.kill() {
                Ok(_) => {
                    let _ = child.wait(); // Clean up zombie
                }
                Err(e) => {
                    debug!("Failed to kill synthesizer process: {}", e);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_missing_program() {
        let mut utterances = Utterances::new();
        let result = utterances.spawn("nvsr-no-such-synthesizer", &["hi".to_string()]);
        assert!(matches!(result, Err(NvsrError::BackendUnavailable(_))));
        assert!(utterances.is_empty());
    }

    #[test]
    fn test_reap_and_cancel_empty() {
        let mut utterances = Utterances::new();
        utterances.reap();
        utterances.cancel_all();
        assert!(utterances.is_empty());
    }
}
