//! Screen reader output service backend using the tts crate
//!
//! The `tts` crate speaks through the platform's own speech service:
//! - Speech Dispatcher on Linux
//! - AVFoundation on macOS
//! - WinRT/SAPI on Windows
//!
//! The service does its own announcement, so text is delivered as-is with
//! only the interrupt flag. Rate, pitch and literal spelling are left to the
//! user's service settings.

use crate::speech::{BackendConfig, Engine, SpeechBackend, SpeechRequest};
use crate::{NvsrError, Result};
use log::{debug, error};
use tts::Tts;

/// Output service backend
pub struct ServiceSynth {
    tts: Tts,
}

impl ServiceSynth {
    /// Connect to the platform speech service
    pub fn new() -> Result<Self> {
        debug!("Connecting to platform speech service");

        let tts = Tts::default().map_err(|e| {
            NvsrError::BackendUnavailable(format!("Failed to initialize TTS: {}", e))
        })?;

        Ok(Self { tts })
    }
}

impl SpeechBackend for ServiceSynth {
    fn engine(&self) -> Engine {
        Engine::ScreenReaderService
    }

    fn speak(&mut self, request: &SpeechRequest, _config: &BackendConfig) -> Result<()> {
        if request.text.is_empty() {
            return Ok(());
        }

        self.tts
            .speak(request.text.as_str(), request.interrupt)
            .map_err(|e| {
                error!("Failed to speak: {}", e);
                NvsrError::BackendUnavailable(format!("Speak failed: {}", e))
            })?;

        Ok(())
    }
}
