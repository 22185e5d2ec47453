//! Tenancy: which site a request belongs to and that site's wired hooks.
//!
//! # Data Flow
//! ```text
//! Host header
//!     → resolver.rs (host → site id, default site fallback)
//!     → registry.rs (site id → SiteContext, loaded once)
//!     → SiteContext.hooks (plugin overrides, not-found handler)
//! ```

pub mod registry;
pub mod resolver;

pub use registry::{SiteContext, SiteRegistry};
pub use resolver::SiteResolver;
