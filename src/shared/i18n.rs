use serde_json::Value;
use std::collections::HashMap;

const EN: &str = include_str!("../../locales/en.json");
const SW: &str = include_str!("../../locales/sw.json");

pub const DEFAULT_LANGUAGE: &str = "en";

pub struct TranslationCatalog {
    tables: HashMap<String, Value>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        for (lang, raw) in [("en", EN), ("sw", SW)] {
            match serde_json::from_str::<Value>(raw) {
                Ok(table) => {
                    tables.insert(lang.to_string(), table);
                }
                Err(e) => {
                    tracing::error!("Invalid locale table for {}: {}", lang, e);
                }
            }
        }
        Self { tables }
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    /// Resolve a dot-separated key against the given language table.
    /// Any miss (unknown language, missing segment, non-string or empty
    /// value) returns the key itself so untranslated UI stays legible.
    pub fn lookup(&self, language: &str, key: &str) -> String {
        let mut value = match self.tables.get(language) {
            Some(table) => table,
            None => return key.to_string(),
        };

        for segment in key.split('.') {
            match value.get(segment) {
                Some(next) => value = next,
                None => return key.to_string(),
            }
        }

        match value.as_str() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => key.to_string(),
        }
    }
}

impl Default for TranslationCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_resolves_nested_keys() {
        let catalog = TranslationCatalog::new();
        assert_eq!(catalog.lookup("en", "attendance.present"), "Present");
        assert_eq!(catalog.lookup("sw", "attendance.present"), "Yupo");
        assert_eq!(catalog.lookup("en", "invoices.status.paid"), "Paid");
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        let catalog = TranslationCatalog::new();
        assert_eq!(catalog.lookup("en", "nav.nonexistent"), "nav.nonexistent");
        assert_eq!(catalog.lookup("en", "no.such.path"), "no.such.path");
    }

    #[test]
    fn unknown_language_falls_back_to_the_key() {
        let catalog = TranslationCatalog::new();
        assert_eq!(catalog.lookup("de", "nav.dashboard"), "nav.dashboard");
    }

    #[test]
    fn non_leaf_lookup_falls_back_to_the_key() {
        let catalog = TranslationCatalog::new();
        // "attendance" resolves to an object, not a string.
        assert_eq!(catalog.lookup("en", "attendance"), "attendance");
    }
}
