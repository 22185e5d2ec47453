//! Plugin-list overrides.
//!
//! A site's configuration names plugins with an on/off flag. The platform
//! receives the names of the active ones, in the order they were configured,
//! in place of its own stored list.

use std::fmt;

/// Which of the platform's plugin lists an override replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginScope {
    /// Plugins active for the resolved site only.
    Site,
    /// Plugins active across every site of the network.
    Sitewide,
}

impl fmt::Display for PluginScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginScope::Site => write!(f, "site"),
            PluginScope::Sitewide => write!(f, "sitewide"),
        }
    }
}

/// Plugin identifiers and their flags, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginMap(Vec<(String, bool)>);

impl PluginMap {
    pub fn iter(&self) -> std::slice::Iter<'_, (String, bool)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, bool)> for PluginMap {
    fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Names of the active plugins, preserving configuration order.
pub fn active_plugins(map: &PluginMap) -> Vec<String> {
    map.iter()
        .filter(|(_, active)| *active)
        .map(|(name, _)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, bool)]) -> PluginMap {
        entries.iter().map(|(n, a)| (n.to_string(), *a)).collect()
    }

    #[test]
    fn test_filters_inactive_and_keeps_order() {
        let plugins = map(&[("seo", true), ("cache", false), ("forms", true)]);
        assert_eq!(active_plugins(&plugins), vec!["seo", "forms"]);
    }

    #[test]
    fn test_order_is_not_sorted() {
        let plugins = map(&[("zeta", true), ("alpha", true)]);
        assert_eq!(active_plugins(&plugins), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_empty_map() {
        assert!(active_plugins(&PluginMap::default()).is_empty());
    }
}
