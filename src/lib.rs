//! Per-site plugin and redirect gateway library.

pub mod config;
pub mod hooks;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod plugins;
pub mod redirect;
pub mod sites;

pub use config::{ConfigStore, GatewayConfig, SiteConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use redirect::{RedirectAction, RedirectEngine, RedirectRule};
