//! Session state and editor event handling
//!
//! The [`Session`] is constructed once per editor session and owns
//! everything that changes between events: configuration overrides, the
//! cursor tracker, the command-output capture window and the indentation
//! settings. Each editor event goes through [`Session::handle`], which
//! classifies it, normalizes the text to speak and hands the request to the
//! speaker.
//!
//! Handlers never fail. A failed utterance or editor command is logged and
//! dropped so the next event is processed normally.

pub mod config;
pub mod tracker;

use crate::editor::{parse_event, CompletedItem, EditorEvent, EditorHost, Selection, OUTPUT_VAR};
use crate::prosody::IndentSettings;
use crate::speech::{normalize, SpeakOptions, Speaker};
use config::{Config, Setting};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use tracker::{CursorAnnouncement, CursorSnapshot, CursorTracker};

/// Starts with a non-word character
static NON_WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\W").expect("valid regex"));

/// Word separators
static NON_WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid regex"));

/// Spoken when insert mode starts
const INSERT_ON: &str = "INSERT ON";

/// Spoken when insert mode ends
const INSERT_OFF: &str = "INSERT OFF";

/// Speed used for explanations of code
const EXPLANATION_SPEED: i32 = 200;

/// How much slower detailed reading is than the configured speed
const DETAIL_SLOWDOWN: i32 = 100;

/// The word just finished by typing `ch` at 1-based column `col`
///
/// Returns a word only when `ch` is a non-word character typed right after a
/// word character.
pub fn word_before_cursor(ch: &str, col: usize, line: &str) -> Option<String> {
    if !NON_WORD_START.is_match(ch) {
        return None;
    }

    let before: String = line.chars().take(col.saturating_sub(1)).collect();
    let last = before.chars().last()?;
    if NON_WORD_START.is_match(&last.to_string()) {
        return None;
    }

    NON_WORD_RUN
        .split(&before)
        .filter(|w| !w.is_empty())
        .last()
        .map(str::to_string)
}

/// One editor session
pub struct Session<S: Speaker, H: EditorHost> {
    /// Configuration, including runtime overrides from the editor
    pub config: Config,

    speaker: S,
    host: H,

    /// Last cursor snapshot and pending suppression
    tracker: CursorTracker,

    /// Command output is being redirected
    capturing: bool,

    /// Indentation settings of the current buffer
    indent: IndentSettings,

    /// Speech output on or off
    enabled: bool,
}

impl<S: Speaker, H: EditorHost> Session<S, H> {
    /// Start a session
    pub fn new(config: Config, speaker: S, mut host: H) -> Self {
        let enabled = config.get_bool(Setting::EnableAtStartup);
        info!("Starting session (speech {})", if enabled { "on" } else { "off" });

        if let Err(e) = host.set_ignore_cursor_event(false) {
            error!("Failed to reset cursor flag: {}", e);
        }

        Self {
            config,
            speaker,
            host,
            tracker: CursorTracker::default(),
            capturing: false,
            indent: IndentSettings::default(),
            enabled,
        }
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn tracker(&self) -> &CursorTracker {
        &self.tracker
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn indent_settings(&self) -> IndentSettings {
        self.indent
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Handle one raw protocol line
    ///
    /// Blank lines, invalid UTF-8 and malformed events are skipped.
    pub fn handle_line(&mut self, raw: &[u8]) {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                warn!(
                    "Ignoring event that is not UTF-8 ({}): {:?}",
                    e,
                    String::from_utf8_lossy(raw)
                );
                return;
            }
        };
        if line.trim().is_empty() {
            return;
        }

        match parse_event(line) {
            Ok(event) => {
                debug!("Event: {:?}", event);
                self.handle(event);
            }
            Err(e) => warn!("Ignoring malformed event {:?}: {}", line.trim_end(), e),
        }
    }

    /// Handle one editor event
    pub fn handle(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::SessionStart { line, row, col } => {
                debug!("Cursor starts at {}:{}", row, col);
                self.tracker = CursorTracker::new(CursorSnapshot::new(row, col, line));
            }
            EditorEvent::CursorMoved { line, row, col } => self.cursor_moved(line, row, col),
            EditorEvent::TextYankPost {
                operator,
                regcontents,
            } => self.text_changed(&operator, &regcontents),
            EditorEvent::InsertCharPre { ch, col, line } => self.insert_char(&ch, col, &line),
            EditorEvent::CompleteDone { item } => self.complete_done(item.as_ref()),
            EditorEvent::CmdlineEnter => self.cmdline_enter(),
            EditorEvent::CmdlineLeave { output } => self.cmdline_leave(output.as_deref()),
            EditorEvent::InsertEnter => self.mode_transition(INSERT_ON),
            EditorEvent::InsertLeave => self.mode_transition(INSERT_OFF),
            EditorEvent::IndentSettings {
                expandtab,
                shiftwidth,
            } => {
                debug!("Indent settings: expandtab={} shiftwidth={}", expandtab, shiftwidth);
                self.indent = IndentSettings::new(expandtab, shiftwidth);
            }
            EditorEvent::SetOption { name, value } => self.set_option(&name, &value),
            EditorEvent::Speak { text } => self.speak(&text, SpeakOptions::default()),
            EditorEvent::SpeakLine { line } => self.speak(&line, SpeakOptions::default()),
            EditorEvent::SpeakLineDetail { line } => {
                let options = self.detail_options();
                self.speak(&line, options);
            }
            EditorEvent::SpeakRange { selection } => {
                self.speak_selection(&selection, SpeakOptions::default())
            }
            EditorEvent::SpeakRangeDetail { selection } => {
                let options = self.detail_options();
                self.speak_selection(&selection, options);
            }
            EditorEvent::SpeakExplanation { text } => self.speak_explanation(&text),
            EditorEvent::ToggleSpeech => {
                self.enabled = !self.enabled;
                info!("Speech {}", if self.enabled { "enabled" } else { "disabled" });
            }
        }
    }

    /// Normalize text and dispatch it
    ///
    /// Failures are logged; the caller always continues.
    pub fn speak(&mut self, text: &str, options: SpeakOptions) {
        if text.is_empty() {
            return;
        }

        let request = normalize(text, &options, &self.config.speech_defaults(), self.indent);
        if !self.enabled {
            debug!("Speech disabled, not saying '{}'", request.text);
            return;
        }

        debug!("Saying '{}'", request.text);
        let prefs = self.config.voice_preferences();
        if let Err(e) = self.speaker.say(&request, &prefs) {
            error!("Dropping utterance '{}': {}", request.text, e);
        }
    }

    fn cursor_moved(&mut self, line: String, row: usize, col: usize) {
        if !self.config.get_bool(Setting::AutoSpeakLine) {
            return;
        }

        match self.tracker.cursor_moved(CursorSnapshot::new(row, col, line)) {
            CursorAnnouncement::Suppressed => {
                if let Err(e) = self.host.set_ignore_cursor_event(false) {
                    error!("Failed to clear cursor flag: {}", e);
                }
            }
            CursorAnnouncement::Character(text) | CursorAnnouncement::Line(text) => {
                self.speak(&text, SpeakOptions::default());
            }
        }
    }

    /// Yank or delete
    ///
    /// Every operator suppresses the cursor event that follows it; only a
    /// delete is spoken.
    fn text_changed(&mut self, operator: &str, regcontents: &[String]) {
        self.tracker.suppress_next();
        if let Err(e) = self.host.set_ignore_cursor_event(true) {
            error!("Failed to set cursor flag: {}", e);
        }

        if operator == "d" {
            if let Some(text) = regcontents.first() {
                self.speak(text, SpeakOptions::default());
            }
        }
    }

    fn insert_char(&mut self, ch: &str, col: usize, line: &str) {
        let speak_keypresses = self.config.get_bool(Setting::SpeakKeypresses);
        let speak_words = self.config.get_bool(Setting::SpeakWords);
        if !(speak_keypresses || speak_words) {
            return;
        }

        if speak_words {
            if let Some(word) = word_before_cursor(ch, col, line) {
                self.speak(&word, SpeakOptions::default());
            }
        }

        // Queued so it does not cut off the word
        if speak_keypresses {
            self.speak(ch, SpeakOptions::default().queued());
        }
    }

    fn complete_done(&mut self, item: Option<&CompletedItem>) {
        if !self.config.get_bool(Setting::SpeakCompletions) {
            return;
        }

        match item.map(CompletedItem::label) {
            Some(label) if !label.is_empty() => self.speak(label, SpeakOptions::default()),
            _ => debug!("Empty completion, nothing to say"),
        }
    }

    fn cmdline_enter(&mut self) {
        if !self.config.get_bool(Setting::AutoSpeakOutput) {
            return;
        }

        match self.host.begin_capture(OUTPUT_VAR) {
            Ok(()) => self.capturing = true,
            Err(e) => error!("Failed to start output capture: {}", e),
        }
    }

    fn cmdline_leave(&mut self, output: Option<&str>) {
        // An open redirect is closed even if output speech was turned off
        if std::mem::take(&mut self.capturing) {
            if let Err(e) = self.host.end_capture() {
                error!("Failed to end output capture: {}", e);
            }
        } else {
            debug!("Command line left without an open capture");
        }

        if !self.config.get_bool(Setting::AutoSpeakOutput) {
            return;
        }

        let text = output.unwrap_or_default().replace('\0', "\n");
        let text = text.trim();
        if !text.is_empty() {
            self.speak(text, SpeakOptions::default());
        }
    }

    fn mode_transition(&mut self, phrase: &str) {
        if !self.config.get_bool(Setting::SpeakModeTransitions) {
            return;
        }
        self.speak(phrase, SpeakOptions::default());
    }

    fn set_option(&mut self, name: &str, value: &serde_json::Value) {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                warn!("Ignoring option {} with unsupported value {}", name, other);
                return;
            }
        };

        if let Err(e) = self.config.set(name, &value) {
            warn!("Ignoring option override: {}", e);
        }
    }

    /// Slower reading with brackets named and generic operators left alone
    fn detail_options(&self) -> SpeakOptions {
        SpeakOptions::default()
            .brackets(true)
            .generic(false)
            .speed(self.config.speed() - DETAIL_SLOWDOWN)
    }

    fn speak_selection(&mut self, selection: &Selection, options: SpeakOptions) {
        for line in selection.text_lines() {
            self.speak(&line, options.clone());
        }
    }

    /// Explanations are prose, so no punctuation or bracket names
    fn speak_explanation(&mut self, text: &str) {
        let options = SpeakOptions::default()
            .standard(false)
            .brackets(false)
            .announce_indent(false)
            .speed(EXPLANATION_SPEED);
        self.speak(text, options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_before_cursor() {
        // Typing ";" after "foo" at column 4
        assert_eq!(word_before_cursor(";", 4, "foo"), Some("foo".to_string()));
        assert_eq!(word_before_cursor(" ", 10, "let value"), Some("value".to_string()));
    }

    #[test]
    fn test_no_word_after_separator() {
        assert_eq!(word_before_cursor(" ", 5, "foo "), None);
        assert_eq!(word_before_cursor(" ", 1, ""), None);
    }

    #[test]
    fn test_word_char_typed() {
        assert_eq!(word_before_cursor("x", 4, "foo"), None);
    }

    #[test]
    fn test_word_in_middle_of_line() {
        // Cursor after "bar" in "foo.bar baz"
        assert_eq!(
            word_before_cursor("(", 8, "foo.bar baz"),
            Some("bar".to_string())
        );
    }
}
