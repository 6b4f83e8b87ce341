//! Application layer services implementing business logic.
//!
//! Services consume the domain ports and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Identifier generation and link storage
//! - [`services::gate_service::GateService`] - Gate steps and CAPTCHA verification

pub mod services;
