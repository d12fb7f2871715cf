//! macOS `say` backend
//!
//! Prosody and spelling are embedded in the text as `say` control
//! sequences: `[[ pbas +N]]` shifts the pitch baseline and
//! `[[ char LTRL ]]` switches to letter-by-letter reading. An interrupting
//! utterance ends with an explicit stop marker.

use super::Utterances;
use crate::speech::{BackendConfig, Engine, SpeechBackend, SpeechRequest};
use crate::Result;
use log::debug;

/// Appended to utterances that should cut off current speech
const STOP_MARKER: &str = ", STOP.";

/// `say` backend
pub struct SaySynth {
    program: String,
    utterances: Utterances,
}

impl SaySynth {
    /// Use `say` from `PATH`
    pub fn new() -> Self {
        Self::with_program("say")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            utterances: Utterances::new(),
        }
    }

    /// Build the argument list for one utterance
    pub fn command_args(request: &SpeechRequest, config: &BackendConfig) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(voice) = config.voice() {
            args.push("-v".to_string());
            args.push(voice.to_string());
        }
        if let Some(speed) = request.rate() {
            args.push("-r".to_string());
            args.push(speed.to_string());
        }

        let mut text = request.text.clone();
        if let Some(pitch) = request.pitch_shift() {
            text = format!("[[ pbas {:+}]] {}", pitch, text);
        }
        if config.use_literal_spelling {
            text = format!("[[ char LTRL ]] {}", text);
        }
        if request.interrupt {
            text.push_str(STOP_MARKER);
        }
        args.push(text);

        args
    }

    /// Collect finished processes
    pub fn reap(&mut self) {
        self.utterances.reap();
    }
}

impl Default for SaySynth {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechBackend for SaySynth {
    fn engine(&self) -> Engine {
        Engine::PlatformSayCli
    }

    fn speak(&mut self, request: &SpeechRequest, config: &BackendConfig) -> Result<()> {
        if request.text.is_empty() {
            return Ok(());
        }

        let args = Self::command_args(request, config);
        debug!("say args: {:?}", args);
        self.utterances.spawn(&self.program, &args)
    }
}
