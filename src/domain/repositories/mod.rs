//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ShortLinkRepository`] - The identifier store

pub mod short_link_repository;

pub use short_link_repository::ShortLinkRepository;

#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
