//! Server-rendered gate pages.
//!
//! Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`ads`] - Ad sources rendered into the pages
//! - [`error`] - HTML error pages
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Gate route configuration

pub mod ads;
pub mod error;
pub mod handlers;
pub mod routes;

pub use ads::AdSettings;
pub use error::PageError;
