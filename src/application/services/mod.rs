//! Business logic services for the application layer.

pub mod gate_service;
pub mod link_service;

pub use gate_service::{GateService, GateView, VerifiedRedirect};
pub use link_service::LinkService;
