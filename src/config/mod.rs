//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! gateway.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!
//! <sites.directory>/<prefix><site id>.toml (first request for the site)
//!     → loader.rs (parse into a table)
//!     → store.rs (ConfigStore, lowercase keys, populated once)
//!     → site.rs (SiteConfig, typed view used for wiring)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All gateway fields have defaults to allow minimal configs
//! - Site files are not validated: malformed values degrade to empty ones

pub mod loader;
pub mod schema;
pub mod site;
pub mod store;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{GatewayConfig, RequestConfig, SiteHost, SitesConfig};
pub use site::SiteConfig;
pub use store::ConfigStore;
