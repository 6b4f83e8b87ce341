//! Identifier store implementations.
//!
//! - [`PgShortLinkRepository`] - PostgreSQL via SQLx
//! - [`InMemoryShortLinkRepository`] - process-local map

pub mod memory_short_link_repository;
pub mod pg_short_link_repository;

pub use memory_short_link_repository::InMemoryShortLinkRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
