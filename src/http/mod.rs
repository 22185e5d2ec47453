//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, host and raw URI extraction)
//!     → sites (resolve site, load its hooks)
//!     → upstream platform
//!     → 404 + should_redirect → site's not-found handler
//!     → response.rs (301 redirect or upstream response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::HttpServer;
