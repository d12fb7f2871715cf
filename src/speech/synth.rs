//! Speech backend abstraction
//!
//! Three interchangeable engines sit behind [`SpeechBackend`]: the platform
//! screen reader output service, `espeak`, and the macOS `say` command.
//! The engine is chosen per utterance by a small priority rule: the service
//! when it is configured and reachable, otherwise the configured command
//! line synthesizer.
//!
//! Dispatch is fire-and-forget. A backend returns as soon as the utterance
//! has been handed off; it never waits for speech to finish.

use super::backends::espeak::EspeakSynth;
use super::backends::say::SaySynth;
use super::backends::service::ServiceSynth;
use super::SpeechRequest;
use crate::Result;
use log::{debug, info, warn};

/// Available speech engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Screen reader output service (Speech Dispatcher, AVFoundation, SAPI)
    ScreenReaderService,
    /// `espeak` command line synthesizer
    EspeakCli,
    /// `say` command line synthesizer
    PlatformSayCli,
}

/// Backend selection for one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub engine: Engine,
    pub voice: Option<String>,
    pub use_literal_spelling: bool,
}

impl BackendConfig {
    /// Voice name, if one is configured
    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref().filter(|v| !v.is_empty())
    }
}

/// Engine preferences taken from the current configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoicePreferences {
    pub use_service: bool,
    pub use_espeak: bool,
    pub voice: Option<String>,
}

/// Pick the engine for one utterance
///
/// The service wins when it is both configured and available; otherwise
/// `espeak` if configured, else `say`.
pub fn resolve_backend(
    prefs: &VoicePreferences,
    service_available: bool,
    request: &SpeechRequest,
) -> BackendConfig {
    let engine = if prefs.use_service && service_available {
        Engine::ScreenReaderService
    } else if prefs.use_espeak {
        Engine::EspeakCli
    } else {
        Engine::PlatformSayCli
    };

    BackendConfig {
        engine,
        voice: prefs.voice.clone().filter(|v| !v.is_empty()),
        use_literal_spelling: request.literal,
    }
}

/// A speech engine
///
/// Implementations hand the utterance off and return immediately. Pitch
/// support differs per engine: an engine without a pitch control ignores
/// `request.pitch`.
pub trait SpeechBackend {
    /// Which engine this is
    fn engine(&self) -> Engine;

    /// Dispatch one utterance
    fn speak(&mut self, request: &SpeechRequest, config: &BackendConfig) -> Result<()>;
}

/// Anything that can deliver a normalized utterance
///
/// The session only talks to this trait, which keeps event handling testable
/// without a synthesizer.
pub trait Speaker {
    fn say(&mut self, request: &SpeechRequest, prefs: &VoicePreferences) -> Result<()>;
}

/// State of the lazily connected output service
enum ServiceSlot {
    Untried,
    Ready(ServiceSynth),
    Unavailable,
}

/// Routes each utterance to the backend chosen by [`resolve_backend`]
pub struct SpeechDispatcher {
    service: ServiceSlot,
    espeak: EspeakSynth,
    say: SaySynth,
}

impl SpeechDispatcher {
    /// Create a dispatcher using `espeak` and `say` from `PATH`
    pub fn new() -> Self {
        Self::with_cli(EspeakSynth::new(), SaySynth::new())
    }

    /// Create a dispatcher with specific command line backends
    pub fn with_cli(espeak: EspeakSynth, say: SaySynth) -> Self {
        Self {
            service: ServiceSlot::Untried,
            espeak,
            say,
        }
    }

    /// Connect to the output service on first use
    ///
    /// A failed connection is remembered so it is not retried per keystroke.
    fn service_available(&mut self) -> bool {
        if let ServiceSlot::Untried = self.service {
            info!("Trying screen reader output service...");
            self.service = match ServiceSynth::new() {
                Ok(synth) => {
                    info!("✓ Successfully initialized output service backend");
                    ServiceSlot::Ready(synth)
                }
                Err(e) => {
                    warn!("✗ Output service unavailable, using command line synthesizer: {}", e);
                    ServiceSlot::Unavailable
                }
            };
        }
        matches!(self.service, ServiceSlot::Ready(_))
    }

    fn backend(&mut self, engine: Engine) -> &mut dyn SpeechBackend {
        match (engine, &mut self.service) {
            (Engine::ScreenReaderService, ServiceSlot::Ready(service)) => service,
            (Engine::EspeakCli, _) => &mut self.espeak,
            _ => &mut self.say,
        }
    }
}

impl Default for SpeechDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Speaker for SpeechDispatcher {
    fn say(&mut self, request: &SpeechRequest, prefs: &VoicePreferences) -> Result<()> {
        self.espeak.reap();
        self.say.reap();

        let service_available = prefs.use_service && self.service_available();
        let config = resolve_backend(prefs, service_available, request);
        debug!("Dispatching to {:?}", config.engine);

        let backend = self.backend(config.engine);
        backend.speak(request, &config)
    }
}
