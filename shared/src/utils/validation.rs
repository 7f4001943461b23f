//! Email identity utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic email shape check; full RFC 5322 is overkill for signup forms
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap());

/// Normalize an email address for storage and lookup
///
/// Identity comparison is case-insensitive across the whole address, so
/// normalization happens once here and every store entry point uses it.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Check whether an email address has a plausible shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(normalize_email(email).as_str())
}

/// Mask an email address for log output (e.g., `al***@x.com`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 2 => {
            let prefix: String = local.chars().take(2).collect();
            format!("{}***@{}", prefix, domain)
        }
        Some((_, domain)) => format!("***@{}", domain),
        None => "***".to_string(),
    }
}
