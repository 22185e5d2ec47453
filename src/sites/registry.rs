//! Per-site contexts, loaded at most once per process.
//!
//! # Design Decisions
//! - One `ConfigStore` per site id; tenants never share a store
//! - Loading happens on the first request for a site, on the blocking pool
//! - Concurrent first requests may both read the file; the first context
//!   inserted is the one every request sees
//! - A missing file caches an inactive context; a broken file is not cached

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;

use crate::config::loader::{load_site_config, ConfigError};
use crate::config::schema::SitesConfig;
use crate::config::site::SiteConfig;
use crate::config::store::ConfigStore;
use crate::hooks::{wiring, HookRegistry};

/// Everything the gateway holds for one site.
#[derive(Debug, Default)]
pub struct SiteContext {
    pub site_id: u64,
    pub store: ConfigStore,
    pub config: SiteConfig,
    pub hooks: HookRegistry,
}

impl SiteContext {
    /// Wire a populated store into a fresh hook registry.
    pub fn new(site_id: u64, store: ConfigStore) -> Self {
        let mut hooks = HookRegistry::new();
        let config = wiring::init(&store, &mut hooks);
        Self {
            site_id,
            store,
            config,
            hooks,
        }
    }

    /// A site without a configuration file.
    pub fn inactive(site_id: u64) -> Self {
        Self {
            site_id,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.store.is_initialized()
    }
}

/// Process-wide cache of site contexts keyed by site id.
#[derive(Debug)]
pub struct SiteRegistry {
    directory: PathBuf,
    file_prefix: String,
    sites: DashMap<u64, Arc<SiteContext>>,
}

impl SiteRegistry {
    pub fn new(config: &SitesConfig) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            file_prefix: config.file_prefix.clone(),
            sites: DashMap::new(),
        }
    }

    /// The context for `site_id`, loading and wiring it on first use.
    pub async fn get_or_load(&self, site_id: u64) -> Result<Arc<SiteContext>, ConfigError> {
        let cached = self.sites.get(&site_id).map(|site| Arc::clone(&site));
        if let Some(site) = cached {
            return Ok(site);
        }

        let directory = self.directory.clone();
        let file_prefix = self.file_prefix.clone();
        let store = tokio::task::spawn_blocking(move || {
            load_site_config(&directory, &file_prefix, site_id)
        })
        .await??;

        let context = match store {
            Some(store) => SiteContext::new(site_id, store),
            None => SiteContext::inactive(site_id),
        };

        let site = self.sites.entry(site_id).or_insert_with(|| {
            tracing::info!(
                site_id,
                active = context.is_active(),
                hooks = ?context.hooks,
                "Site context initialized"
            );
            Arc::new(context)
        });
        Ok(Arc::clone(&site))
    }

    /// Number of sites loaded so far.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
