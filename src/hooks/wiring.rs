//! Registers a site's configured capabilities with the platform hooks.
//!
//! Presence of a key is the trigger: `plugins = {}` still installs an
//! (empty) override, a missing key leaves the platform's own list in place.

use std::sync::Arc;

use crate::config::site::SiteConfig;
use crate::config::store::ConfigStore;
use crate::hooks::HostHooks;
use crate::plugins::active_plugins;
use crate::redirect::{RedirectEngine, UrlSanitizer};

/// Inspect `store` and register the matching hooks. Returns the typed view
/// of the configuration that was wired.
pub fn init(store: &ConfigStore, hooks: &mut dyn HostHooks) -> SiteConfig {
    init_with_sanitizer(store, hooks, None)
}

/// Like [`init`], with a custom sanitizer for redirect targets.
pub fn init_with_sanitizer(
    store: &ConfigStore,
    hooks: &mut dyn HostHooks,
    sanitizer: Option<Arc<dyn UrlSanitizer>>,
) -> SiteConfig {
    let config = SiteConfig::from_store(store);

    if let Some(map) = config.sitewide_plugins.clone() {
        tracing::debug!(entries = map.len(), "Registering sitewide plugin override");
        hooks.register_sitewide_plugin_list_override(Arc::new(move || active_plugins(&map)));
    }

    if let Some(map) = config.plugins.clone() {
        tracing::debug!(entries = map.len(), "Registering plugin override");
        hooks.register_plugin_list_override(Arc::new(move || active_plugins(&map)));
    }

    if let Some(rules) = config.redirects.clone() {
        tracing::debug!(rules = rules.len(), "Registering redirect handler");
        let engine = match sanitizer {
            Some(sanitizer) => RedirectEngine::with_sanitizer(rules, sanitizer),
            None => RedirectEngine::new(rules),
        };
        hooks.on_not_found_main_request(Arc::new(move |path: &str| engine.evaluate(path)));
    }

    config
}
