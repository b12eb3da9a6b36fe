#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Ledger state machine.
//!
//! Responsibilities:
//! - Maintain the unspent output pool
//! - Decide whether a transaction is valid against that pool
//! - Apply batches of candidate transactions, one epoch at a time
//!
//! Signature schemes are pluggable via [`ledger_core::SignatureVerifier`];
//! this crate never inspects key or signature bytes itself.

pub mod apply;
pub mod config;
pub mod error;
pub mod utxo;
pub mod validate;

pub use apply::*;
pub use config::*;
pub use error::*;
pub use utxo::*;
pub use validate::*;
