//! NVSR - Neovim screen reader
//!
//! Turns live editor state (cursor motion, inserted and deleted text,
//! command output, mode changes) into speech. Editor events are classified,
//! normalized into speakable text and handed to a speech backend.

pub mod editor;
pub mod error;
pub mod prosody;
pub mod rules;
pub mod speech;
pub mod state;

pub use error::{NvsrError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "nvsr";
