//! Per-utterance options and the request handed to a backend

/// Options supplied by an event handler for one utterance
///
/// `None` fields fall back to the configured defaults when the request is
/// normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakOptions {
    /// Speak bracket characters by name
    pub brackets: Option<bool>,
    /// Interpret generic infix operators (`->`, `===` ...)
    pub generic: Option<bool>,
    /// Apply punctuation and comparison names
    pub standard: bool,
    /// Speech rate override
    pub speed: Option<i32>,
    /// Prefix the utterance with its indentation level
    pub announce_indent: Option<bool>,
    /// Spell the text instead of reading it as words
    pub literal: bool,
    /// Cancel whatever is currently being spoken
    pub interrupt: bool,
}

impl Default for SpeakOptions {
    fn default() -> Self {
        Self {
            brackets: None,
            generic: None,
            standard: true,
            speed: None,
            announce_indent: None,
            literal: false,
            interrupt: true,
        }
    }
}

impl SpeakOptions {
    pub fn brackets(mut self, on: bool) -> Self {
        self.brackets = Some(on);
        self
    }

    pub fn generic(mut self, on: bool) -> Self {
        self.generic = Some(on);
        self
    }

    pub fn standard(mut self, on: bool) -> Self {
        self.standard = on;
        self
    }

    pub fn speed(mut self, speed: i32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn announce_indent(mut self, on: bool) -> Self {
        self.announce_indent = Some(on);
        self
    }

    pub fn literal(mut self) -> Self {
        self.literal = true;
        self
    }

    /// Queue behind current speech instead of cancelling it
    pub fn queued(mut self) -> Self {
        self.interrupt = false;
        self
    }
}

/// A fully resolved utterance
///
/// Produced by the normalization pipeline and consumed once by a backend.
/// A literal request never has any substitution flag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub speed: Option<i32>,
    pub pitch: Option<i32>,
    pub literal: bool,
    pub interrupt: bool,
    pub apply_brackets: bool,
    pub apply_generic: bool,
    pub apply_standard: bool,
    pub announce_indent: bool,
}

impl SpeechRequest {
    /// Pitch to request from the synthesizer, if any
    ///
    /// A zero offset is the engine's own baseline and is not sent.
    pub fn pitch_shift(&self) -> Option<i32> {
        self.pitch.filter(|&p| p != 0)
    }

    /// Speed to request from the synthesizer, if any
    pub fn rate(&self) -> Option<i32> {
        self.speed.filter(|&s| s > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SpeakOptions::default();
        assert!(options.standard);
        assert!(options.interrupt);
        assert!(!options.literal);
        assert_eq!(options.brackets, None);
        assert_eq!(options.speed, None);
    }

    #[test]
    fn test_builders() {
        let options = SpeakOptions::default()
            .brackets(true)
            .generic(false)
            .speed(250)
            .queued();
        assert_eq!(options.brackets, Some(true));
        assert_eq!(options.generic, Some(false));
        assert_eq!(options.speed, Some(250));
        assert!(!options.interrupt);
    }
}
