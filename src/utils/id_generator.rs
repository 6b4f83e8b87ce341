//! Short identifier generation and validation.
//!
//! Identifiers are drawn from the URL-safe base64 alphabet
//! (`A-Z a-z 0-9 - _`) using OS randomness.

use base64::Engine as _;
use regex::Regex;
use std::sync::LazyLock;

/// Default identifier length.
pub const DEFAULT_ID_LENGTH: usize = 6;

/// Smallest identifier length accepted by configuration.
pub const MIN_ID_LENGTH: usize = 4;

/// Largest identifier length accepted by configuration.
pub const MAX_ID_LENGTH: usize = 32;

/// Identifiers that are route segments and can never name a link.
pub const RESERVED_IDS: &[&str] = &["step2", "step3", "verify", "shorten", "health", "static"];

/// Shape of any identifier the service could have issued.
static SHORT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid regex"));

/// Generates a random identifier of `length` characters.
///
/// Never returns a [`RESERVED_IDS`] entry: a reserved draw is discarded and
/// redrawn.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
///
/// # Examples
///
/// ```ignore
/// let id = generate_short_id(6);
/// assert_eq!(id.len(), 6);
/// ```
pub fn generate_short_id(length: usize) -> String {
    loop {
        let candidate = random_token(length);
        if !is_reserved(&candidate) {
            return candidate;
        }
    }
}

/// Returns `true` for identifiers reserved by the router.
pub fn is_reserved(short_id: &str) -> bool {
    RESERVED_IDS.contains(&short_id)
}

/// Returns `true` if `short_id` could name a link: right alphabet, sane
/// length and not reserved.
pub fn is_valid_short_id(short_id: &str) -> bool {
    SHORT_ID_REGEX.is_match(short_id) && !is_reserved(short_id)
}

fn random_token(length: usize) -> String {
    // Every base64 character carries 6 bits.
    let byte_len = (length * 6).div_ceil(8);
    let mut buffer = vec![0u8; byte_len];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let mut encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buffer);
    encoded.truncate(length);
    encoded
}
