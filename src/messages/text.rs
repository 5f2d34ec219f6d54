//! # Localized text with positional placeholders.
//!
//! [`LocalizedText`] maps each supported [`Language`] to an optional text.
//! Texts may contain positional placeholders `$1..$N`, replaced by
//! [`substitute_placeholders`] at event-composition time.
//!
//! ## Rules
//! - Placeholders are 1-based: `$1` is the first argument. `$0` stays literal.
//! - Absent or out-of-range arguments leave the placeholder intact.
//! - Substitution is a single pass: argument content is never rescanned.
//!
//! ## Example
//! ```
//! use stepvisor::{Language, LocalizedText};
//!
//! let text = LocalizedText::english("copied $1 of $2 files");
//! let filled = text.substitute(&["3", "7"]);
//! assert_eq!(filled.get(Language::En), Some("copied 3 of 7 files"));
//! ```

use serde::{Deserialize, Serialize};

/// Supported catalog languages.
///
/// The set is closed; [`Language::ALL`] fixes the iteration order used when
/// writing catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// German.
    De,
    /// French.
    Fr,
}

impl Language {
    /// All languages in their stable catalog order.
    pub const ALL: [Language; 3] = [Language::En, Language::De, Language::Fr];

    /// Two-letter language code used as a JSON key.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Fr => "fr",
        }
    }
}

/// Text localized per language; slots are independent and may be absent.
///
/// JSON encoding always carries all three slots (`null` when absent), so
/// encoded events round-trip without losing which slots were set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// English slot.
    pub en: Option<String>,
    /// German slot.
    pub de: Option<String>,
    /// French slot.
    pub fr: Option<String>,
}

impl LocalizedText {
    /// Creates a text with only the English slot set.
    pub fn english(text: impl Into<String>) -> Self {
        Self {
            en: Some(text.into()),
            de: None,
            fr: None,
        }
    }

    /// Sets the slot for `language`, consuming and returning `self`.
    pub fn with(mut self, language: Language, text: impl Into<String>) -> Self {
        self.set(language, text);
        self
    }

    /// Sets the slot for `language`.
    pub fn set(&mut self, language: Language, text: impl Into<String>) {
        let slot = match language {
            Language::En => &mut self.en,
            Language::De => &mut self.de,
            Language::Fr => &mut self.fr,
        };
        *slot = Some(text.into());
    }

    /// Returns the slot for `language`, if set.
    pub fn get(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.en.as_deref(),
            Language::De => self.de.as_deref(),
            Language::Fr => self.fr.as_deref(),
        }
    }

    /// Returns the best text for human display: English first, then the
    /// remaining languages in stable order.
    pub fn preferred(&self) -> Option<&str> {
        Language::ALL.into_iter().find_map(|lang| self.get(lang))
    }

    /// Applies placeholder substitution to every present slot.
    pub fn substitute(&self, args: &[&str]) -> Self {
        self.map(|text| substitute_placeholders(text, args))
    }

    /// Prepends `prefix` to every present slot.
    pub fn prefixed(&self, prefix: &str) -> Self {
        self.map(|text| format!("{prefix}{text}"))
    }

    fn map(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            en: self.en.as_deref().map(&f),
            de: self.de.as_deref().map(&f),
            fr: self.fr.as_deref().map(&f),
        }
    }
}

/// Replaces positional placeholders `$1..$N` in `text` with `args`.
///
/// `$k` becomes `args[k - 1]` when present; `$0`, out-of-range indices and
/// a bare `$` stay literal. With an empty argument list this is the
/// identity. The output is built in one pass, so substituted argument
/// content is never itself scanned for placeholders.
pub fn substitute_placeholders(text: &str, args: &[&str]) -> String {
    if args.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let digits_len = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());
        let digits = &after[..digits_len];
        if digits.is_empty() {
            out.push('$');
            rest = after;
            continue;
        }
        match digits.parse::<usize>() {
            Ok(index) if index >= 1 && index <= args.len() => {
                out.push_str(args[index - 1]);
            }
            _ => {
                out.push('$');
                out.push_str(digits);
            }
        }
        rest = &after[digits_len..];
    }
    out.push_str(rest);
    out
}
