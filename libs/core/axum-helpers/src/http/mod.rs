//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - Fixed CORS headers on every response
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{cors_headers, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(axum::middleware::from_fn(cors_headers));
//! ```

pub mod cors;
pub mod security;

pub use cors::{ALLOWED_HEADERS, ALLOWED_METHODS, cors_headers, preflight};
pub use security::security_headers;
