//! Shortcode generation utilities.
//!
//! Generated codes are drawn uniformly from the base62 alphabet. Collision
//! handling (retry and widening) lives in the registry; this module only
//! produces candidates.

use rand::Rng;

/// Alphabet for generated shortcodes.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of freshly generated shortcodes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Hard ceiling on shortcode length, for generated and custom codes alike.
pub const MAX_CODE_LENGTH: usize = 20;

/// Generates a random base62 shortcode of the given length.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(GENERATED_CODE_LENGTH);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
