#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Ledger core: canonical types, constants, hashing, and signature verification.
//!
//! This crate is the transaction model consumed by `ledger-state`: it supplies
//! transaction hashes, per-input signing payloads, and the verifier seam. It
//! does not know about the unspent output pool.

pub mod constants;
pub mod crypto;
pub mod serialization;
pub mod types;

pub use constants::*;
pub use crypto::*;
pub use serialization::*;
pub use types::*;

/// Re-exported so callers can build keys without depending on `k256` directly.
pub use k256::ecdsa::SigningKey;
