//! Infrastructure layer for external integrations.
//!
//! Implements the ports defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Destination cache (Redis and no-op implementations)
//! - [`captcha`] - CAPTCHA provider clients
//! - [`persistence`] - Identifier store implementations

pub mod cache;
pub mod captcha;
pub mod persistence;
