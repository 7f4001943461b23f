//! Credential store service
//!
//! Owns password hashing and verification on top of the account
//! repository. Raw passwords are consumed here and never stored, logged,
//! or echoed.

mod service;

pub use service::CredentialService;
