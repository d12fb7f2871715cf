//! Substitution rule tables
//!
//! Each table is an ordered list of literal patterns and the phrase spoken in
//! their place. Tables are applied by the normalization pipeline in a fixed
//! sequence (see [`PASS_ORDER`]):
//!
//! 1. generic infix operators (`===`, `->`, `++` ...)
//! 2. standard punctuation, then comparison and logical operators
//! 3. brackets
//! 4. whitespace names, only when the whole text is whitespace
//!
//! Later passes must never re-match text inserted by earlier ones, so `===`
//! has to be consumed by the generic table before the standard table sees
//! `==`. The order inside a table matters for the same reason.

/// Which table a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    GenericInfix,
    Standard,
    Brackets,
    Whitespace,
}

/// Order in which the pipeline runs the tables
pub const PASS_ORDER: [RuleCategory; 4] = [
    RuleCategory::GenericInfix,
    RuleCategory::Standard,
    RuleCategory::Brackets,
    RuleCategory::Whitespace,
];

/// An ordered mapping of literal pattern to spoken phrase
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    pub category: RuleCategory,
    pub rules: &'static [(&'static str, &'static str)],
}

/// Multi-character operators found in many languages
pub const GENERIC_INFIX: RuleTable = RuleTable {
    category: RuleCategory::GenericInfix,
    rules: &[
        ("->", "stab"),
        (">=>", "fish"),
        ("<=>", "spaceship"),
        ("=>", "fat arrow"),
        ("===", "triple equals"),
        ("++", "increment"),
        ("--", "decrement"),
        ("+=", "add with"),
        ("-=", "subtract with"),
        ("/=", "divide with"),
        ("*=", "multiply with"),
        ("?:", "elvis"),
    ],
};

/// Punctuation followed by comparison and logical operators
///
/// Comparison patterns carry their surrounding spaces so that `a<b` inside a
/// generic type is left for the bracket table.
pub const STANDARD: RuleTable = RuleTable {
    category: RuleCategory::Standard,
    rules: &[
        (",", ", comma,"),
        (".", ", dot,"),
        (":", ", colon,"),
        ("\n", ", newline,"),
        (" < ", "less than"),
        (" > ", "greater than"),
        (" >= ", "greater than or equal to"),
        (" <= ", "less than or equal to"),
        (" == ", "is equal to"),
        (" && ", "and"),
        (" || ", "or"),
    ],
};

pub const BRACKETS: RuleTable = RuleTable {
    category: RuleCategory::Brackets,
    rules: &[
        ("(", ", open paren,"),
        (")", ", close paren,"),
        ("[", ", open bracket,"),
        ("]", ", close bracket,"),
        ("{", ", open curly,"),
        ("}", ", close curly,"),
        ("<", ", open angle,"),
        (">", ", close angle,"),
    ],
};

pub const WHITESPACE: RuleTable = RuleTable {
    category: RuleCategory::Whitespace,
    rules: &[
        (" ", "space"),
        ("\u{a0}", "no-break space"),
        ("\t", "tab"),
    ],
};

impl RuleTable {
    /// Look up the table for a category
    pub fn for_category(category: RuleCategory) -> &'static RuleTable {
        match category {
            RuleCategory::GenericInfix => &GENERIC_INFIX,
            RuleCategory::Standard => &STANDARD,
            RuleCategory::Brackets => &BRACKETS,
            RuleCategory::Whitespace => &WHITESPACE,
        }
    }

    /// Replace every occurrence of each pattern, in table order
    ///
    /// Each phrase is framed by single spaces so it never runs into the
    /// neighbouring word. A pattern is replaced in one left-to-right sweep, so
    /// the inserted phrase is not rescanned by the same pattern.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (pattern, phrase) in self.rules {
            if out.contains(pattern) {
                out = out.replace(pattern, &format!(" {} ", phrase));
            }
        }
        out
    }
}

/// True when the text is non-empty and made only of whitespace
pub fn is_all_whitespace(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_whitespace)
}
