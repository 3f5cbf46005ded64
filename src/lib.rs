//! secrets-bootstrap — library crate for the startup secret hook.
//!
//! Re-exports modules needed by the binary and by integration tests in `tests/`.

pub mod config;
pub mod errors;
pub mod secrets;
pub mod vault;

pub use secrets::{api_key, register, register_with, resolve, resolve_from, SecretValue, Secrets};
