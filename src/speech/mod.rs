//! Speech system: normalization and backend dispatch

pub mod backends;
pub mod normalize;
pub mod request;
pub mod synth;

pub use normalize::{normalize, SpeechDefaults};
pub use request::{SpeakOptions, SpeechRequest};
pub use synth::{
    resolve_backend, BackendConfig, Engine, SpeechBackend, SpeechDispatcher, Speaker,
    VoicePreferences,
};
