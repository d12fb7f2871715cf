//! espeak command line backend
//!
//! Each utterance is one `espeak` process. Pitch is passed with `-p`, rate
//! with `-s`. There is no inline literal marker, so spelled-out text is sent
//! with its characters separated by spaces. espeak has no stop marker
//! either: an interrupting utterance kills the processes still speaking.

use super::Utterances;
use crate::speech::{BackendConfig, Engine, SpeechBackend, SpeechRequest};
use crate::Result;
use log::debug;

/// espeak backend
pub struct EspeakSynth {
    /// Program name or path
    program: String,

    /// Processes still speaking
    utterances: Utterances,
}

impl EspeakSynth {
    /// Use `espeak` from `PATH`
    pub fn new() -> Self {
        Self::with_program("espeak")
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
        if let Some(pitch) = request.pitch_shift() {
            args.push("-p".to_string());
            args.push(pitch.to_string());
        }
        if let Some(speed) = request.rate() {
            args.push("-s".to_string());
            args.push(speed.to_string());
        }

        let text = if config.use_literal_spelling {
            spell_out(&request.text)
        } else {
            request.text.clone()
        };
        args.push(text);

        args
    }

    /// Collect finished processes
    pub fn reap(&mut self) {
        self.utterances.reap();
    }
}

impl Default for EspeakSynth {
    fn default() -> Self {
        Self::new()
    }
}

/// Separate every character with a space so each one is named
fn spell_out(text: &str) -> String {
    text.chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

impl SpeechBackend for EspeakSynth {
    fn engine(&self) -> Engine {
        Engine::EspeakCli
    }

    fn speak(&mut self, request: &SpeechRequest, config: &BackendConfig) -> Result<()> {
        if request.text.is_empty() {
            return Ok(());
        }

        if request.interrupt && !self.utterances.is_empty() {
            self.utterances.cancel_all();
        }

        let args = Self::command_args(request, config);
        debug!("espeak args: {:?}", args);
        self.utterances.spawn(&self.program, &args)
    }
}

impl Drop for EspeakSynth {
    fn drop(&mut self) {
        debug!("Shutting down espeak backend");
        self.utterances.cancel_all();
    }
}
