//! Data Transfer Objects for API requests and responses.
//!
//! Request and response bodies use camelCase field names.

pub mod health;
pub mod shorten;
pub mod verify;
