//! Input validation for shorten submissions.
//!
//! Every rule reports a [`FieldError`] naming the offending batch entry and
//! field, so a whole batch can be checked and all problems surfaced at once.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::domain::entities::LinkSubmission;
use crate::error::FieldError;

/// Compiled regex for custom shortcode validation.
static SHORTCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{3,20}$").unwrap());

/// Largest accepted validity window, in minutes (ten years).
pub const MAX_VALIDITY_MINUTES: i64 = 5_256_000;

/// Checks whether a shortcode is well-formed.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: ASCII letters and digits
pub fn is_valid_shortcode(code: &str) -> bool {
    SHORTCODE_REGEX.is_match(code)
}

/// Validates one batch entry, returning every rule violation found.
///
/// `index` is the zero-based position of the entry in its batch and is
/// carried into the produced errors.
///
/// # Rules
///
/// - URL: non-empty, parseable, scheme `http` or `https`
/// - Validity: positive and at most [`MAX_VALIDITY_MINUTES`]
/// - Preferred shortcode: well-formed per [`is_valid_shortcode`]
pub fn validate_submission(index: usize, submission: &LinkSubmission) -> Vec<FieldError> {
    let mut errors = Vec::new();

    validate_url(index, submission.trimmed_url(), &mut errors);

    if let Some(minutes) = submission.validity_minutes {
        validate_validity(index, minutes, &mut errors);
    }

    if let Some(code) = submission.preferred_code() {
        validate_preferred_code(index, code, &mut errors);
    }

    errors
}

fn validate_url(index: usize, url: &str, errors: &mut Vec<FieldError>) {
    if url.is_empty() {
        errors.push(FieldError::new(index, "original_url", "URL must not be empty"));
        return;
    }

    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => {
            errors.push(FieldError::new(
                index,
                "original_url",
                format!("URL scheme must be http or https, got '{}'", parsed.scheme()),
            ));
        }
        Err(_) => {
            errors.push(FieldError::new(index, "original_url", "URL is not well-formed"));
        }
    }
}

fn validate_validity(index: usize, minutes: i64, errors: &mut Vec<FieldError>) {
    if minutes <= 0 {
        errors.push(FieldError::new(
            index,
            "validity_minutes",
            "validity must be a positive number of minutes",
        ));
    } else if minutes > MAX_VALIDITY_MINUTES {
        errors.push(FieldError::new(
            index,
            "validity_minutes",
            format!("validity must be at most {MAX_VALIDITY_MINUTES} minutes"),
        ));
    }
}

fn validate_preferred_code(index: usize, code: &str, errors: &mut Vec<FieldError>) {
    if !is_valid_shortcode(code) {
        errors.push(FieldError::new(
            index,
            "preferred_shortcode",
            "shortcode must be 3-20 ASCII letters or digits",
        ));
    }
}
