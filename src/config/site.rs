//! Typed view over a site's configuration store.
//!
//! The three recognized keys are converted once, when the site is loaded.
//! A key that is present but has an unexpected shape still counts as present
//! and converts to an empty value, with a warning in the log.

use toml::Value;

use crate::config::store::ConfigStore;
use crate::plugins::PluginMap;
use crate::redirect::RedirectRule;

pub const KEY_SITEWIDE_PLUGINS: &str = "sitewideplugins";
pub const KEY_PLUGINS: &str = "plugins";
pub const KEY_REDIRECTS: &str = "redirects";

/// Site configuration with one optional field per capability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteConfig {
    pub sitewide_plugins: Option<PluginMap>,
    pub plugins: Option<PluginMap>,
    pub redirects: Option<Vec<RedirectRule>>,
}

impl SiteConfig {
    /// Build the typed record from a populated store.
    pub fn from_store(store: &ConfigStore) -> Self {
        Self {
            sitewide_plugins: store
                .get(KEY_SITEWIDE_PLUGINS)
                .map(|v| plugin_map(KEY_SITEWIDE_PLUGINS, v)),
            plugins: store.get(KEY_PLUGINS).map(|v| plugin_map(KEY_PLUGINS, v)),
            redirects: store.get(KEY_REDIRECTS).map(redirect_rules),
        }
    }

    /// True when no capability is configured.
    pub fn is_empty(&self) -> bool {
        self.sitewide_plugins.is_none() && self.plugins.is_none() && self.redirects.is_none()
    }
}

/// Loose truthiness for plugin flags.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Boolean(b) => *b,
        Value::Integer(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Table(t) => !t.is_empty(),
        Value::Datetime(_) => true,
    }
}

fn plugin_map(key: &str, value: &Value) -> PluginMap {
    match value {
        Value::Table(table) => table
            .iter()
            .map(|(name, flag)| (name.clone(), is_truthy(flag)))
            .collect(),
        other => {
            tracing::warn!(key, kind = other.type_str(), "Plugin list is not a table, treating as empty");
            PluginMap::default()
        }
    }
}

fn redirect_rules(value: &Value) -> Vec<RedirectRule> {
    match value {
        Value::Table(table) => table
            .iter()
            .filter_map(|(pattern, target)| match target.as_str() {
                Some(target) => Some(RedirectRule::new(pattern.clone(), target)),
                None => {
                    tracing::warn!(pattern = %pattern, "Redirect target is not a string, skipping");
                    None
                }
            })
            .collect(),
        Value::Array(entries) => entries.iter().filter_map(redirect_entry).collect(),
        other => {
            tracing::warn!(kind = other.type_str(), "Redirects are neither a table nor an array, treating as empty");
            Vec::new()
        }
    }
}

fn redirect_entry(entry: &Value) -> Option<RedirectRule> {
    let pair = match entry {
        Value::Array(pair) if pair.len() == 2 => pair[0].as_str().zip(pair[1].as_str()),
        Value::Table(t) => t
            .get("from")
            .and_then(Value::as_str)
            .zip(t.get("to").and_then(Value::as_str)),
        _ => None,
    };

    if pair.is_none() {
        tracing::warn!(entry = %entry, "Malformed redirect entry, skipping");
    }
    pair.map(|(pattern, target)| RedirectRule::new(pattern, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(src: &str) -> SiteConfig {
        SiteConfig::from_store(&ConfigStore::from(src.parse::<toml::Table>().unwrap()))
    }

    #[test]
    fn test_absent_keys_are_none() {
        let config = site("other = 1");
        assert!(config.is_empty());
    }

    #[test]
    fn test_plugin_map_keeps_document_order() {
        let config = site(
            r#"
            [Plugins]
            seo = true
            cache = false
            forms = 1
            "#,
        );

        let plugins = config.plugins.unwrap();
        let names: Vec<_> = plugins.iter().map(|(name, active)| (name.as_str(), *active)).collect();
        assert_eq!(names, vec![("seo", true), ("cache", false), ("forms", true)]);
    }

    #[test]
    fn test_malformed_value_still_counts_as_present() {
        let config = site(r#"plugins = "seo""#);
        assert_eq!(config.plugins, Some(PluginMap::default()));
    }

    #[test]
    fn test_redirect_table_and_array_forms() {
        let table = site(
            r##"
            [redirects]
            "/old-page" = "/new-page"
            '#^/blog/(\d+)$#' = "/articles/$1"
            "##,
        );
        assert_eq!(
            table.redirects.unwrap(),
            vec![
                RedirectRule::new("/old-page", "/new-page"),
                RedirectRule::new(r"#^/blog/(\d+)$#", "/articles/$1"),
            ]
        );

        let array = site(
            r#"
            redirects = [
                ["/a", "/b"],
                { from = "/c", to = "/d" },
                ["/broken"],
            ]
            "#,
        );
        assert_eq!(
            array.redirects.unwrap(),
            vec![RedirectRule::new("/a", "/b"), RedirectRule::new("/c", "/d")]
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::String("0".into())));
        assert!(!is_truthy(&Value::String(String::new())));
        assert!(is_truthy(&Value::String("yes".into())));
        assert!(!is_truthy(&Value::Integer(0)));
        assert!(!is_truthy(&Value::Array(Vec::new())));
        assert!(is_truthy(&Value::Float(0.5)));
    }
}
