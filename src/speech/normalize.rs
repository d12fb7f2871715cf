//! Normalization pipeline
//!
//! Turns raw editor text into a [`SpeechRequest`]: options are resolved
//! against the configured defaults first, prosody is derived from the raw
//! text, then the rule tables run in [`PASS_ORDER`]. Nothing here talks to a
//! backend.

use super::{SpeakOptions, SpeechRequest};
use crate::prosody::{indent_level, pitch_offset, IndentSettings};
use crate::rules::{is_all_whitespace, RuleCategory, RuleTable, PASS_ORDER};

/// Configured fallbacks for options an event handler leaves unset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechDefaults {
    pub speak_brackets: bool,
    pub interpret_generic: bool,
    pub speed: i32,
    pub announce_indent: bool,
    pub pitch_multiplier: i32,
}

impl Default for SpeechDefaults {
    fn default() -> Self {
        Self {
            speak_brackets: false,
            interpret_generic: false,
            speed: 350,
            announce_indent: false,
            pitch_multiplier: 1,
        }
    }
}

/// Build the request for one utterance
pub fn normalize(
    raw: &str,
    options: &SpeakOptions,
    defaults: &SpeechDefaults,
    indent: IndentSettings,
) -> SpeechRequest {
    let speed = options.speed.unwrap_or(defaults.speed);

    if options.literal {
        return SpeechRequest {
            text: raw.to_string(),
            speed: Some(speed),
            pitch: None,
            literal: true,
            interrupt: options.interrupt,
            apply_brackets: false,
            apply_generic: false,
            apply_standard: false,
            announce_indent: false,
        };
    }

    let apply_brackets = options.brackets.unwrap_or(defaults.speak_brackets);
    let apply_generic = options.generic.unwrap_or(defaults.interpret_generic);
    let apply_standard = options.standard;
    let announce_indent = options.announce_indent.unwrap_or(defaults.announce_indent);

    // Prosody comes from the raw text, before substitutions touch whitespace
    let level = indent_level(raw, indent);
    let pitch = pitch_offset(level, defaults.pitch_multiplier);

    let mut text = raw.to_string();
    for category in PASS_ORDER {
        let enabled = match category {
            RuleCategory::GenericInfix => apply_generic,
            RuleCategory::Standard => apply_standard,
            RuleCategory::Brackets => apply_brackets,
            RuleCategory::Whitespace => is_all_whitespace(&text),
        };
        if enabled {
            text = RuleTable::for_category(category).apply(&text);
        }
    }

    if announce_indent {
        text = format!("indent {}, {}", level, text);
    }

    SpeechRequest {
        text,
        speed: Some(speed),
        pitch: Some(pitch),
        literal: false,
        interrupt: options.interrupt,
        apply_brackets,
        apply_generic,
        apply_standard,
        announce_indent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spaces() -> IndentSettings {
        IndentSettings::new(true, 4)
    }

    #[test]
    fn test_defaults_resolved() {
        let defaults = SpeechDefaults {
            speak_brackets: true,
            interpret_generic: true,
            speed: 300,
            ..SpeechDefaults::default()
        };
        let request = normalize("f(x)", &SpeakOptions::default(), &defaults, spaces());
        assert!(request.apply_brackets);
        assert!(request.apply_generic);
        assert_eq!(request.speed, Some(300));
        assert!(request.text.contains("open paren"));

        // Explicit options win over defaults
        let options = SpeakOptions::default().brackets(false).speed(200);
        let request = normalize("f(x)", &options, &defaults, spaces());
        assert!(!request.apply_brackets);
        assert_eq!(request.speed, Some(200));
        assert_eq!(request.text, "f(x)");
    }

    #[test]
    fn test_triple_equals_wins() {
        let options = SpeakOptions::default().generic(true);
        let request = normalize("a === b", &options, &SpeechDefaults::default(), spaces());
        assert!(request.text.contains("triple equals"));
        assert!(!request.text.contains("is equal to"));
        assert!(!request.text.contains('='));
    }

    #[test]
    fn test_literal_bypasses_tables() {
        let options = SpeakOptions::default().generic(true).brackets(true).literal();
        let request = normalize("a->b", &options, &SpeechDefaults::default(), spaces());
        assert_eq!(request.text, "a->b");
        assert!(request.literal);
        assert!(!request.apply_generic);
        assert!(!request.apply_brackets);
        assert!(!request.apply_standard);
        assert_eq!(request.pitch, None);
    }

    #[test]
    fn test_whitespace_only_text() {
        let request = normalize("  \t", &SpeakOptions::default(), &SpeechDefaults::default(), spaces());
        assert_eq!(request.text, " space  space  tab ");
        assert!(!request.text.contains('\t'));
    }

    #[test]
    fn test_whitespace_table_skipped_for_words() {
        let request = normalize("a b", &SpeakOptions::default(), &SpeechDefaults::default(), spaces());
        assert_eq!(request.text, "a b");
    }

    #[test]
    fn test_indent_announcement_and_pitch() {
        let defaults = SpeechDefaults {
            pitch_multiplier: 5,
            ..SpeechDefaults::default()
        };
        let options = SpeakOptions::default().announce_indent(true);
        let request = normalize("        return", &options, &defaults, spaces());
        assert_eq!(request.text, "indent 2,         return");
        assert_eq!(request.pitch, Some(10));
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let options = SpeakOptions::default().generic(true).brackets(true);
        let defaults = SpeechDefaults::default();
        let first = normalize("    if (a >= b) { x++ }", &options, &defaults, spaces());
        let second = normalize("    if (a >= b) { x++ }", &options, &defaults, spaces());
        assert_eq!(first, second);
    }
}
