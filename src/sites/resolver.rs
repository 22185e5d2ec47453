//! Host header to site id resolution.

use std::collections::HashMap;

use crate::config::schema::SitesConfig;

/// Maps request hosts to numeric site ids.
#[derive(Debug, Clone, Default)]
pub struct SiteResolver {
    hosts: HashMap<String, u64>,
    default_site_id: Option<u64>,
}

impl SiteResolver {
    pub fn from_config(config: &SitesConfig) -> Self {
        Self {
            hosts: config
                .hosts
                .iter()
                .map(|m| (m.host.to_lowercase(), m.id))
                .collect(),
            default_site_id: config.default_site_id,
        }
    }

    /// Resolve a `Host` header value (port ignored, case-insensitive).
    pub fn resolve(&self, host: Option<&str>) -> Option<u64> {
        host.map(strip_port)
            .and_then(|h| self.hosts.get(&h.to_lowercase()).copied())
            .or(self.default_site_id)
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literals keep their colons.
    if let Some(end) = host.strip_prefix('[').and_then(|h| h.find(']')) {
        return &host[..end + 2];
    }
    host.split(':').next().unwrap_or(host)
}
