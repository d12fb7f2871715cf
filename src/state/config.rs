//! Configuration management

use crate::speech::{SpeechDefaults, VoicePreferences};
use crate::{NvsrError, Result};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Section holding every option
const SECTION: &str = "speech";

/// Recognized options
///
/// Each option has a key in `~/.nvsr.cfg` (and the same name as an editor
/// global variable) and a default used whenever it is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    EnableAtStartup,
    InterpretGenericInfix,
    SpeakBrackets,
    SpeakKeypresses,
    SpeakWords,
    SpeakModeTransitions,
    SpeakCompletions,
    AutoSpeakLine,
    AutoSpeakOutput,
    SpeakIndent,
    PitchMultiplier,
    SpeakSpeed,
    UseEspeak,
    UseService,
    Voice,
    EnableLogging,
}

impl Setting {
    pub const ALL: [Setting; 16] = [
        Setting::EnableAtStartup,
        Setting::InterpretGenericInfix,
        Setting::SpeakBrackets,
        Setting::SpeakKeypresses,
        Setting::SpeakWords,
        Setting::SpeakModeTransitions,
        Setting::SpeakCompletions,
        Setting::AutoSpeakLine,
        Setting::AutoSpeakOutput,
        Setting::SpeakIndent,
        Setting::PitchMultiplier,
        Setting::SpeakSpeed,
        Setting::UseEspeak,
        Setting::UseService,
        Setting::Voice,
        Setting::EnableLogging,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Setting::EnableAtStartup => "enable_at_startup",
            Setting::InterpretGenericInfix => "interpret_generic_infix",
            Setting::SpeakBrackets => "speak_brackets",
            Setting::SpeakKeypresses => "speak_keypresses",
            Setting::SpeakWords => "speak_words",
            Setting::SpeakModeTransitions => "speak_mode_transitions",
            Setting::SpeakCompletions => "speak_completions",
            Setting::AutoSpeakLine => "auto_speak_line",
            Setting::AutoSpeakOutput => "auto_speak_output",
            Setting::SpeakIndent => "speak_indent",
            Setting::PitchMultiplier => "pitch_multiplier",
            Setting::SpeakSpeed => "speak_speed",
            Setting::UseEspeak => "use_espeak",
            Setting::UseService => "use_service",
            Setting::Voice => "speak_voice",
            Setting::EnableLogging => "enable_logging",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            Setting::EnableAtStartup => "true",
            Setting::InterpretGenericInfix => "false",
            Setting::SpeakBrackets => "false",
            Setting::SpeakKeypresses => "true",
            Setting::SpeakWords => "true",
            Setting::SpeakModeTransitions => "true",
            Setting::SpeakCompletions => "true",
            Setting::AutoSpeakLine => "true",
            Setting::AutoSpeakOutput => "true",
            Setting::SpeakIndent => "false",
            Setting::PitchMultiplier => "1",
            Setting::SpeakSpeed => "350",
            Setting::UseEspeak => "false",
            Setting::UseService => "true",
            Setting::Voice => "",
            Setting::EnableLogging => "false",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Parse a boolean the way both the config file and editor variables write it
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Application configuration
///
/// Values are read on every call so an override from the editor takes
/// effect on the next event.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Backing file, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load `~/.nvsr.cfg`, creating it with defaults if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        if !path.exists() {
            info!("Config file not found, creating default");
            let config = Self {
                ini: Self::default_config(),
                path: Some(path.to_path_buf()),
            };
            config.save()?;
            return Ok(config);
        }

        let ini = Ini::load_from_file(path)
            .map_err(|e| NvsrError::IniParse(format!("Failed to load config: {}", e)))?;
        Ok(Self {
            ini,
            path: Some(path.to_path_buf()),
        })
    }

    /// Configuration holding only defaults, not backed by a file
    pub fn in_memory() -> Self {
        Self {
            ini: Self::default_config(),
            path: None,
        }
    }

    /// Save configuration to its file
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| NvsrError::Config("Configuration has no file".to_string()))?;
        debug!("Saving config to {:?}", path);
        self.ini
            .write_to_file(path)
            .map_err(|e| NvsrError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.nvsr.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nvsr.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();
        for setting in Setting::ALL {
            ini.with_section(Some(SECTION))
                .set(setting.key(), setting.default_value());
        }
        ini
    }

    /// Raw value of a setting, falling back to its default
    fn raw(&self, setting: Setting) -> &str {
        self.ini
            .get_from(Some(SECTION), setting.key())
            .unwrap_or(setting.default_value())
    }

    /// Get a boolean setting
    pub fn get_bool(&self, setting: Setting) -> bool {
        parse_bool(self.raw(setting))
            .or_else(|| parse_bool(setting.default_value()))
            .unwrap_or(false)
    }

    /// Get an integer setting
    pub fn get_int(&self, setting: Setting) -> i32 {
        self.raw(setting)
            .trim()
            .parse()
            .ok()
            .or_else(|| setting.default_value().parse().ok())
            .unwrap_or(0)
    }

    /// Get a string setting
    pub fn get_string(&self, setting: Setting) -> String {
        self.raw(setting).to_string()
    }

    /// Set a value by key
    ///
    /// Used when the editor overrides an option at runtime.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let setting = Setting::from_key(key)
            .ok_or_else(|| NvsrError::Config(format!("Unknown option: {}", key)))?;
        debug!("Setting {} = {}", setting.key(), value);
        self.ini.with_section(Some(SECTION)).set(setting.key(), value);
        Ok(())
    }

    /// Defaults for options event handlers leave unset
    pub fn speech_defaults(&self) -> SpeechDefaults {
        SpeechDefaults {
            speak_brackets: self.get_bool(Setting::SpeakBrackets),
            interpret_generic: self.get_bool(Setting::InterpretGenericInfix),
            speed: self.speed(),
            announce_indent: self.get_bool(Setting::SpeakIndent),
            pitch_multiplier: self.get_int(Setting::PitchMultiplier),
        }
    }

    /// Engine preferences for the dispatcher
    pub fn voice_preferences(&self) -> VoicePreferences {
        let voice = self.get_string(Setting::Voice);
        VoicePreferences {
            use_service: self.get_bool(Setting::UseService),
            use_espeak: self.get_bool(Setting::UseEspeak),
            voice: if voice.is_empty() { None } else { Some(voice) },
        }
    }

    /// Configured speech rate
    pub fn speed(&self) -> i32 {
        self.get_int(Setting::SpeakSpeed)
    }

    /// Should logging go to the diagnostic log file?
    pub fn logging_enabled(&self) -> bool {
        self.get_bool(Setting::EnableLogging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::in_memory();
        assert!(config.get_bool(Setting::EnableAtStartup));
        assert!(!config.get_bool(Setting::InterpretGenericInfix));
        assert!(config.get_bool(Setting::SpeakKeypresses));
        assert_eq!(config.get_int(Setting::PitchMultiplier), 1);
        assert_eq!(config.speed(), 350);
        assert_eq!(config.get_string(Setting::Voice), "");
        assert!(config.path().is_none());
    }

    #[test]
    fn test_keys_round_trip() {
        for setting in Setting::ALL {
            assert_eq!(Setting::from_key(setting.key()), Some(setting));
        }
        assert_eq!(Setting::from_key("nope"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_set_override() {
        let mut config = Config::in_memory();
        config.set("speak_brackets", "1").unwrap();
        config.set("speak_speed", "200").unwrap();
        assert!(config.get_bool(Setting::SpeakBrackets));
        assert_eq!(config.speech_defaults().speed, 200);
        assert!(config.set("not_an_option", "1").is_err());
    }

    #[test]
    fn test_bad_values_fall_back() {
        let mut config = Config::in_memory();
        config.set("speak_speed", "fast").unwrap();
        config.set("speak_words", "sometimes").unwrap();
        assert_eq!(config.speed(), 350);
        assert!(config.get_bool(Setting::SpeakWords));
    }

    #[test]
    fn test_voice_preferences() {
        let mut config = Config::in_memory();
        assert_eq!(config.voice_preferences().voice, None);
        assert!(config.voice_preferences().use_service);

        config.set("speak_voice", "en-us").unwrap();
        config.set("use_espeak", "true").unwrap();
        let prefs = config.voice_preferences();
        assert_eq!(prefs.voice.as_deref(), Some("en-us"));
        assert!(prefs.use_espeak);
    }

    #[test]
    fn test_save_without_file() {
        assert!(Config::in_memory().save().is_err());
    }
}
