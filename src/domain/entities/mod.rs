//! Core domain entities.
//!
//! - [`ShortLink`] - A short identifier mapped to a destination URL
//! - [`NewShortLink`] - Input for creating a short link

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
