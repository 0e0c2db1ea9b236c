//! HTTP routes and middleware.
//!
//! This module provides the card routes and shared HTTP functionality used by
//! the application server.

pub mod cards;
pub mod security;

pub use cards::router;
pub use security::{build_cors_layer, security_headers_middleware, SecurityHeaders};
