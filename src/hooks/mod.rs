//! Extension points of the upstream platform.
//!
//! # Data Flow
//! ```text
//! Site loaded (once per process):
//!     wiring.rs inspects which keys are present
//!     → registers providers/handlers on a HostHooks implementation
//!
//! Per request:
//!     plugin list query → registered provider (or platform default)
//!     upstream 404 + RequestContext::should_redirect() → not-found handler
//! ```

pub mod context;
pub mod registry;
pub mod wiring;

use std::sync::Arc;

use crate::redirect::RedirectAction;

pub use context::RequestContext;
pub use registry::HookRegistry;

/// Computes a plugin list that replaces the platform's stored one.
pub type PluginListProvider = Arc<dyn Fn() -> Vec<String> + Send + Sync>;

/// Runs for not-found main requests with the raw request path.
pub type NotFoundHandler = Arc<dyn Fn(&str) -> Option<RedirectAction> + Send + Sync>;

/// Registration surface the site configuration wires itself into.
pub trait HostHooks {
    fn register_plugin_list_override(&mut self, provider: PluginListProvider);

    fn register_sitewide_plugin_list_override(&mut self, provider: PluginListProvider);

    fn on_not_found_main_request(&mut self, handler: NotFoundHandler);
}
