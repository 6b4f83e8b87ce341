//! Utility functions and helpers.
//!
//! - [`client_ip`] - Client address extraction from request metadata
//! - [`id_generator`] - Random short identifier generation and validation
//! - [`url_check`] - Destination URL validation

pub mod client_ip;
pub mod id_generator;
pub mod url_check;
