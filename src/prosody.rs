//! Indentation level and pitch derivation
//!
//! Deeper indentation is spoken at a higher pitch so that code structure can
//! be heard without announcing every indent.

/// Editor indentation settings (`expandtab` and `shiftwidth`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentSettings {
    /// Indentation is made of spaces rather than tabs
    pub expand_tab: bool,
    /// Number of spaces per indentation level when `expand_tab` is set
    pub shift_width: usize,
}

impl IndentSettings {
    pub fn new(expand_tab: bool, shift_width: usize) -> Self {
        Self {
            expand_tab,
            shift_width,
        }
    }

    /// Whitespace characters per indentation level, never zero
    pub fn unit(&self) -> usize {
        if self.expand_tab {
            self.shift_width.max(1)
        } else {
            1
        }
    }
}

impl Default for IndentSettings {
    /// Neovim defaults: tabs, shiftwidth 8
    fn default() -> Self {
        Self::new(false, 8)
    }
}

/// Count indentation levels at the start of a line
///
/// Leading whitespace characters are divided by the indentation unit. An
/// empty line is level 0.
pub fn indent_level(line: &str, settings: IndentSettings) -> usize {
    let leading = line.chars().take_while(|c| c.is_whitespace()).count();
    leading / settings.unit()
}

/// Pitch offset for an indentation level
pub fn pitch_offset(level: usize, multiplier: i32) -> i32 {
    let level = i32::try_from(level).unwrap_or(i32::MAX);
    level.saturating_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_level_spaces() {
        let spaces = IndentSettings::new(true, 4);
        assert_eq!(indent_level("    x", spaces), 1);
        assert_eq!(indent_level("        x", spaces), 2);
        assert_eq!(indent_level("      x", spaces), 1);
        assert_eq!(indent_level("x", spaces), 0);
        assert_eq!(indent_level("", spaces), 0);
    }

    #[test]
    fn test_indent_level_tabs() {
        let tabs = IndentSettings::new(false, 4);
        assert_eq!(indent_level("\t\tx", tabs), 2);
        assert_eq!(indent_level("  x", tabs), 2);
    }

    #[test]
    fn test_indent_level_whitespace_only() {
        let spaces = IndentSettings::new(true, 2);
        assert_eq!(indent_level("    ", spaces), 2);
        assert_eq!(indent_level(" ", spaces), 0);
    }

    #[test]
    fn test_zero_shift_width() {
        let settings = IndentSettings::new(true, 0);
        assert_eq!(settings.unit(), 1);
        assert_eq!(indent_level("   x", settings), 3);
    }

    #[test]
    fn test_pitch_offset() {
        assert_eq!(pitch_offset(0, 5), 0);
        assert_eq!(pitch_offset(3, 1), 3);
        assert_eq!(pitch_offset(2, 10), 20);
    }
}
