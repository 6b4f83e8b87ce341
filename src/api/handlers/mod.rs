//! HTTP request handlers for JSON endpoints.

pub mod health;
pub mod shorten;
pub mod verify;

pub use health::health_handler;
pub use shorten::shorten_handler;
pub use verify::verify_handler;
