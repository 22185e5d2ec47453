//! In-process hook registry used by the gateway.

use std::fmt;

use crate::hooks::{HostHooks, NotFoundHandler, PluginListProvider};
use crate::plugins::PluginScope;
use crate::redirect::RedirectAction;

/// Holds at most one provider or handler per extension point.
#[derive(Default, Clone)]
pub struct HookRegistry {
    plugins: Option<PluginListProvider>,
    sitewide_plugins: Option<PluginListProvider>,
    not_found: Option<NotFoundHandler>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The overriding plugin list for `scope`, if one is registered.
    pub fn plugin_list(&self, scope: PluginScope) -> Option<Vec<String>> {
        let provider = match scope {
            PluginScope::Site => self.plugins.as_ref(),
            PluginScope::Sitewide => self.sitewide_plugins.as_ref(),
        };
        provider.map(|p| p())
    }

    /// Run the not-found handler, if one is registered.
    pub fn handle_not_found(&self, path: &str) -> Option<RedirectAction> {
        self.not_found.as_ref().and_then(|h| h(path))
    }

    pub fn has_not_found_handler(&self) -> bool {
        self.not_found.is_some()
    }
}

fn register<T>(slot: &mut Option<T>, value: T, hook: &'static str) {
    if slot.is_some() {
        tracing::warn!(hook, "Hook already registered, ignoring");
        return;
    }
    *slot = Some(value);
}

impl HostHooks for HookRegistry {
    fn register_plugin_list_override(&mut self, provider: PluginListProvider) {
        register(&mut self.plugins, provider, "plugins");
    }

    fn register_sitewide_plugin_list_override(&mut self, provider: PluginListProvider) {
        register(&mut self.sitewide_plugins, provider, "sitewide_plugins");
    }

    fn on_not_found_main_request(&mut self, handler: NotFoundHandler) {
        register(&mut self.not_found, handler, "not_found");
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("plugins", &self.plugins.is_some())
            .field("sitewide_plugins", &self.sitewide_plugins.is_some())
            .field("not_found", &self.not_found.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_registry() {
        let registry = HookRegistry::new();
        assert_eq!(registry.plugin_list(PluginScope::Site), None);
        assert_eq!(registry.handle_not_found("/x"), None);
    }

    #[test]
    fn test_second_registration_is_ignored() {
        let mut registry = HookRegistry::new();
        registry.register_plugin_list_override(Arc::new(|| vec!["first".to_string()]));
        registry.register_plugin_list_override(Arc::new(|| vec!["second".to_string()]));

        assert_eq!(registry.plugin_list(PluginScope::Site), Some(vec!["first".to_string()]));
        assert_eq!(registry.plugin_list(PluginScope::Sitewide), None);
    }
}
