//! Configuration schema definitions.
//!
//! This module defines the gateway's own configuration structure. Per-site
//! configuration (plugins, redirects) lives in separate files, see
//! [`crate::config::site`].
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the site gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The platform the gateway sits in front of.
    pub upstream: UpstreamConfig,

    /// Where per-site configuration files live and how hosts map to sites.
    pub sites: SitesConfig,

    /// Request classification (admin area, filter suppression).
    pub request: RequestConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream platform configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:8000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Per-site configuration discovery.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SitesConfig {
    /// Directory holding the `<file_prefix><site id>.toml` files.
    pub directory: String,

    /// File name prefix, followed by the numeric site id.
    pub file_prefix: String,

    /// Site used when no host mapping applies.
    pub default_site_id: Option<u64>,

    /// Host header to site id mappings.
    pub hosts: Vec<SiteHost>,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            directory: "sites".to_string(),
            file_prefix: "site-config-".to_string(),
            default_site_id: Some(1),
            hosts: Vec::new(),
        }
    }
}

/// A single host to site mapping.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SiteHost {
    /// Host name (matched case-insensitively, without port).
    pub host: String,

    /// Numeric site id.
    pub id: u64,
}

/// How inbound requests are classified before redirect evaluation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Path prefixes that belong to the platform's admin area.
    pub admin_prefixes: Vec<String>,

    /// Header that, when set, suppresses the not-found hooks for a request.
    pub suppress_filters_header: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            admin_prefixes: vec!["/wp-admin".to_string()],
            suppress_filters_header: "x-suppress-filters".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.sites.file_prefix, "site-config-");
        assert_eq!(config.sites.default_site_id, Some(1));
        assert_eq!(config.request.admin_prefixes, vec!["/wp-admin".to_string()]);
    }

    #[test]
    fn test_host_mappings() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [upstream]
            address = "10.0.0.2:80"

            [sites]
            directory = "/srv/sites"

            [[sites.hosts]]
            host = "blog.example.com"
            id = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.address, "10.0.0.2:80");
        assert_eq!(config.sites.directory, "/srv/sites");
        assert_eq!(
            config.sites.hosts,
            vec![SiteHost { host: "blog.example.com".into(), id: 3 }]
        );
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
