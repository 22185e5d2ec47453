//! Redirect subsystem.
//!
//! # Data Flow
//! ```text
//! Not-found main request (raw path + query)
//!     → engine.rs (scan rules in order)
//!         → rule.rs (skip / prefix / regex)
//!         → pattern.rs (compile `#...#flags` expressions)
//!     → sanitize.rs (escape the final target)
//!     → Return: RedirectAction (301) or None
//! ```
//!
//! # Design Decisions
//! - First match wins, no best-match scoring
//! - No redirect chains or loop detection
//! - Anomalies (bad patterns, empty rules) are absorbed per rule

pub mod engine;
pub mod pattern;
pub mod rule;
pub mod sanitize;

pub use engine::{evaluate, RedirectAction, RedirectEngine, REDIRECT_STATUS};
pub use rule::{RedirectRule, RuleKind};
pub use sanitize::{EscUrlRaw, UrlSanitizer};
