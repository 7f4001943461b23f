//! One-time password session handling
//!
//! This module provides the student second-factor machinery:
//! - The `OtpStore` capability trait over any atomically-mutable backing
//! - A process-wide in-memory store (the default)
//! - The `CodeDelivery` collaborator for getting codes to users
//! - `OtpService`, orchestrating issuance and verification

mod delivery;
mod memory;
mod service;
mod store;

pub use delivery::CodeDelivery;
pub use memory::InMemoryOtpStore;
pub use service::OtpService;
pub use store::OtpStore;
