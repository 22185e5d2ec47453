//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Detect conflicting host mappings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in the gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.address must not be empty")]
    EmptyUpstream,

    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,

    #[error("sites.directory must not be empty")]
    EmptySitesDirectory,

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("host '{0}' is mapped to more than one site")]
    DuplicateHost(String),

    #[error("admin prefix '{0}' must start with '/'")]
    RelativeAdminPrefix(String),
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream.address.trim().is_empty() {
        errors.push(ValidationError::EmptyUpstream);
    }
    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if config.sites.directory.trim().is_empty() {
        errors.push(ValidationError::EmptySitesDirectory);
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    let mut seen = HashSet::new();
    for mapping in &config.sites.hosts {
        let host = mapping.host.to_lowercase();
        if !seen.insert(host.clone()) {
            errors.push(ValidationError::DuplicateHost(host));
        }
    }

    for prefix in &config.request.admin_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::RelativeAdminPrefix(prefix.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
