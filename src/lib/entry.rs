//! The canonical parsed record shared by all renderers

use std::fmt;

use crate::lib::value::{classify, DiscountKind};

/// One medicine name with its classified discount and bonus terms
///
/// Immutable once built: renderers only ever read it, so a single entry can
/// back all five emitted representations without them disagreeing.
#[derive(Debug, Clone)]
pub struct Entry {
    /// trimmed display name, never empty
    name: String,
    /// trimmed original value token, for renderers that need it verbatim
    raw: String,
    kind: DiscountKind,
    /// text after the first `/` of the token, never re-classified
    bonus: String,
}

impl Entry {
    /// Build an entry, running the value token through the classifier once
    pub fn new<S>(name: S, raw: S) -> Self
    where
        S: ToString,
    {
        let name = name.to_string();
        let raw = raw.to_string();
        let (kind, bonus) = classify(&raw);
        Self {
            name,
            raw,
            kind,
            bonus,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &DiscountKind {
        &self.kind
    }

    /// The bonus part, empty when the token had no `/`
    pub fn bonus(&self) -> &str {
        &self.bonus
    }

    /// Display form of the name for fixed-width columns
    pub fn upper(&self) -> String {
        self.name.to_uppercase()
    }

    /// Upper-cased first character, the section key in alphabetical mode
    pub fn section(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}----- {}", self.name, self.raw)
    }
}
