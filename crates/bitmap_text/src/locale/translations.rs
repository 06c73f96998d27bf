//! Translation dictionary with one-shot overrides
//!
//! Keys are normalized on both insert and lookup: lowercased, with one
//! trailing period stripped. The override map is consumable; an entry is
//! removed the first time it resolves. The whole table is inert while the
//! active language is `"en"`, which is the authoring language of the raw
//! strings.

use std::collections::HashMap;

/// Translation dictionary for a single active language
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    language: String,
    base: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl TranslationTable {
    /// Create an empty table for the given active language
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            base: HashMap::new(),
            overrides: HashMap::new(),
        }
    }

    /// The active language code
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether lookups can resolve at all
    ///
    /// Raw strings are authored in English, so an English table never
    /// translates.
    pub fn is_active(&self) -> bool {
        self.language != "en"
    }

    /// Add an entry to the base dictionary
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.base.insert(normalize(key), value.into());
    }

    /// Add a one-shot override consumed by the first lookup that hits it
    pub fn insert_override(&mut self, key: &str, value: impl Into<String>) {
        self.overrides.insert(normalize(key), value.into());
    }

    /// Whether a translation exists for `key` without consuming anything
    pub fn has_translation(&self, key: &str) -> bool {
        if !self.is_active() {
            return false;
        }
        let key = normalize(key);
        self.overrides.contains_key(&key) || self.base.contains_key(&key)
    }

    /// Look up `key` in the base dictionary only
    pub fn translate(&self, key: &str) -> Option<&str> {
        if !self.is_active() {
            return None;
        }
        self.base.get(&normalize(key)).map(String::as_str)
    }

    /// Resolve `key`, consuming a matching override
    ///
    /// Overrides win over the base dictionary and are removed on first
    /// use; subsequent lookups of the same key fall through to the base
    /// entry, if any.
    pub fn resolve(&mut self, key: &str) -> Option<String> {
        if !self.is_active() {
            return None;
        }
        let key = normalize(key);
        if let Some(hit) = self.overrides.remove(&key) {
            return Some(hit);
        }
        self.base.get(&key).cloned()
    }
}

/// Lowercase and strip one trailing period
fn normalize(key: &str) -> String {
    let lower = key.to_lowercase();
    match lower.strip_suffix('.') {
        Some(stripped) => stripped.to_owned(),
        None => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalization() {
        let mut table = TranslationTable::new("ru");
        table.insert("Search for the Amulet.", "value");

        assert!(table.has_translation("search for the amulet"));
        assert!(table.has_translation("SEARCH FOR THE AMULET."));
        assert_eq!(table.resolve("Search for the Amulet"), Some("value".to_owned()));
    }

    #[test]
    fn test_english_table_is_inert() {
        let mut table = TranslationTable::new("en");
        table.insert("attack", "should never surface");

        assert!(!table.has_translation("attack"));
        assert_eq!(table.resolve("attack"), None);
    }

    #[test]
    fn test_override_consumed_on_first_use() {
        let mut table = TranslationTable::new("de");
        table.insert("attack", "Angriff");
        table.insert_override("attack", "Sturmangriff");

        assert_eq!(table.resolve("attack"), Some("Sturmangriff".to_owned()));
        // Override is gone; base entry takes over
        assert_eq!(table.resolve("attack"), Some("Angriff".to_owned()));
        assert_eq!(table.resolve("attack"), Some("Angriff".to_owned()));
    }

    #[test]
    fn test_only_one_trailing_period_stripped() {
        let mut table = TranslationTable::new("fr");
        table.insert("wait..", "attendre");

        // "wait.." normalizes to "wait." which only matches itself minus one dot
        assert!(table.has_translation("wait.."));
        assert!(!table.has_translation("wait"));
    }
}
