//! Protocol-wide constants for the ledger.

/// Length in bytes of a 32-byte hash.
pub const HASH32_LEN: usize = 32;

/// Suggested bound on inputs per transaction for hosts that want one.
///
/// Not enforced unless the processor is configured with bounds.
pub const MAX_INPUTS_PER_TX: usize = 256;

/// Suggested bound on outputs per transaction for hosts that want one.
///
/// Not enforced unless the processor is configured with bounds.
pub const MAX_OUTPUTS_PER_TX: usize = 256;

/// Maximum encoded transaction size (in bytes) accepted at construction.
pub const MAX_TX_BYTES: usize = 200_000;

/// Domain separator used when hashing transactions.
///
/// Prevents cross-domain hash collisions.
pub const DS_TX: &[u8] = b"LEDGER::TX::V0";

/// Domain separator used when deriving per-input signing payloads.
///
/// Prevents a transaction id from ever being accepted as a signing payload.
pub const DS_SIGHASH: &[u8] = b"LEDGER::SIGHASH::V0";
