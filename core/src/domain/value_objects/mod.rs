//! Value objects representing immutable domain concepts.

pub mod login;

// Re-export commonly used types
pub use login::{AuthResponse, LoginOutcome, OtpChallenge};
