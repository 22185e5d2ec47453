//! Per-site key/value configuration store.
//!
//! Keys are normalized to lowercase on write and on lookup, so `Plugins` and
//! `plugins` address the same entry. Values keep the shape they had in the
//! source file; [`crate::config::site::SiteConfig`] gives them types.

use toml::{Table, Value};

/// Configuration values for one site.
///
/// Owned by a single site context and never shared across tenants.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    data: Table,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge entries into the store. Keys are lowercased; the last write to
    /// a key wins.
    pub fn set<I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        for (key, value) in entries {
            self.data.insert(key.as_ref().to_lowercase(), value);
        }
    }

    /// Populate the store once. A store that already holds data is left
    /// untouched and `false` is returned.
    pub fn init(&mut self, source: Table) -> bool {
        if self.is_initialized() {
            tracing::debug!("Configuration store already initialized");
            return false;
        }
        self.set(source);
        true
    }

    /// Case-insensitive lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(&key.to_lowercase())
    }

    /// Case-insensitive lookup falling back to `default`.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// Whether the key is present, regardless of its value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// True once at least one entry has been stored.
    pub fn is_initialized(&self) -> bool {
        !self.data.is_empty()
    }
}

impl From<Table> for ConfigStore {
    fn from(source: Table) -> Self {
        let mut store = Self::new();
        store.set(source);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> Table {
        src.parse::<Table>().unwrap()
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let store = ConfigStore::from(table("Plugins = { seo = true }"));

        assert!(store.get("plugins").is_some());
        assert_eq!(store.get("Plugins"), store.get("plugins"));
        assert_eq!(store.get("PLUGINS"), store.get("plugins"));
    }

    #[test]
    fn test_get_or_returns_default_when_absent() {
        let empty = ConfigStore::new();
        let fallback = Value::Boolean(false);

        assert_eq!(empty.get_or("plugins", &fallback), &fallback);
        assert_eq!(empty.get_or("", &fallback), &fallback);
    }

    #[test]
    fn test_set_last_write_wins() {
        let mut store = ConfigStore::new();
        store.set(vec![("Mode", Value::String("a".into()))]);
        store.set(vec![("mode", Value::String("b".into()))]);

        assert_eq!(store.get("MODE").and_then(Value::as_str), Some("b"));
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut store = ConfigStore::new();
        assert!(!store.is_initialized());

        assert!(store.init(table("redirects = {}")));
        assert!(store.is_initialized());

        assert!(!store.init(table("plugins = { seo = true }")));
        assert!(store.contains("redirects"));
        assert!(!store.contains("plugins"));
    }

    #[test]
    fn test_init_with_empty_source_stays_uninitialized() {
        let mut store = ConfigStore::new();
        store.init(Table::new());
        assert!(!store.is_initialized());
    }
}
