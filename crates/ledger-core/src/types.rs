// Consensus-critical. Changes require a format bump + tests.
//! Canonical ledger types.
//!
//! This module defines the transaction model consumed by the validator: value
//! types, output identifiers, inputs, outputs and transactions. All encodings
//! derived from these types must remain stable once released.

use crate::constants::*;
use crate::serialization::{signing_payload, txid};
use borsh::{BorshDeserialize, BorshSerialize};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors related to parsing, validation, or construction of core types.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Hex string had an unexpected byte length.
    #[error("invalid hex length: expected {expected} bytes, got {got} bytes")]
    InvalidHexLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes provided.
        got: usize,
    },

    /// Hex decoding failed.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Arithmetic overflow or underflow occurred.
    #[error("amount overflow or underflow")]
    AmountOverflow,

    /// An input index pointed past the end of the input list.
    #[error("input index {index} out of range ({len} inputs)")]
    InputOutOfRange {
        /// Requested input index.
        index: usize,
        /// Number of inputs in the transaction.
        len: usize,
    },

    /// A value violated protocol constraints.
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
}

/// Fixed-size 32-byte hash used throughout the ledger.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hash32(pub [u8; HASH32_LEN]);

impl Hash32 {
    /// Returns an all-zero hash.
    pub const fn zero() -> Self {
        Self([0u8; HASH32_LEN])
    }

    /// Returns the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; HASH32_LEN] {
        &self.0
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash32({})", hex::encode(self.0))
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Hash32 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        if bytes.len() != HASH32_LEN {
            return Err(CoreError::InvalidHexLength {
                expected: HASH32_LEN,
                got: bytes.len(),
            });
        }
        let mut arr = [0u8; HASH32_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

/// Transaction identifier type.
pub type TxId = Hash32;

/// Amount expressed in the smallest unit ("atoms").
///
/// Signed so that a declared negative output is representable and can be
/// rejected by validation rather than by the type system.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Amount(pub i64);

impl Amount {
    /// Returns a zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Constructs an amount from atoms.
    pub const fn from_atoms(atoms: i64) -> Self {
        Self(atoms)
    }

    /// Returns the underlying atom value.
    pub const fn atoms(self) -> i64 {
        self.0
    }

    /// Whether the amount is below zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Amount) -> Result<Self, CoreError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(CoreError::AmountOverflow)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({} atoms)", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} atoms", self.0)
    }
}

/// Public key identity that owns an output.
///
/// The bytes are opaque to this crate's types; the configured
/// [`SignatureVerifier`](crate::crypto::SignatureVerifier) decides how to
/// interpret them (SEC1 for [`EcdsaVerifier`](crate::crypto::EcdsaVerifier)).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PublicKey(pub Vec<u8>);

impl PublicKey {
    /// Returns the encoded key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(&self.0))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// Identifier of one output in the ledger history: creating txid plus position.
///
/// Compared and hashed by value, so it can key the unspent output pool.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, BorshSerialize, BorshDeserialize,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutPoint {
    /// Hash of the transaction that created the output.
    pub txid: TxId,
    /// Position of the output within that transaction.
    pub index: u32,
}

impl OutPoint {
    /// Create a new outpoint.
    pub const fn new(txid: TxId, index: u32) -> Self {
        Self { txid, index }
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)
    }
}

/// A transaction output: a value and the key allowed to spend it.
#[derive(Clone, PartialEq, Eq, Debug, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TxOut {
    /// Value carried by this output.
    pub value: Amount,
    /// Owner public key.
    pub owner: PublicKey,
}

impl TxOut {
    /// Create a new output.
    pub fn new(value: Amount, owner: PublicKey) -> Self {
        Self { value, owner }
    }
}

/// A transaction input: the output it consumes plus the owner's signature.
#[derive(Clone, PartialEq, Eq, Debug, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TxIn {
    /// Output being spent.
    pub prevout: OutPoint,
    /// Signature over this input's signing payload (scheme-specific bytes).
    pub signature: Vec<u8>,
}

impl TxIn {
    /// Create an input with an empty signature, to be filled in after signing.
    pub fn unsigned(prevout: OutPoint) -> Self {
        Self {
            prevout,
            signature: Vec::new(),
        }
    }
}

/// An immutable transaction.
///
/// The hash is computed at construction and recomputed whenever a signature is
/// attached, so it always reflects the current contents.
#[derive(Clone, PartialEq, Eq, Debug, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Transaction {
    hash: TxId,
    inputs: Vec<TxIn>,
    outputs: Vec<TxOut>,
}

impl Transaction {
    /// Build a transaction and compute its hash.
    pub fn new(inputs: Vec<TxIn>, outputs: Vec<TxOut>) -> Result<Self, CoreError> {
        let hash = txid(&inputs, &outputs)?;
        Ok(Self {
            hash,
            inputs,
            outputs,
        })
    }

    /// Canonical transaction id.
    pub fn hash(&self) -> TxId {
        self.hash
    }

    /// Inputs in declaration order.
    pub fn inputs(&self) -> &[TxIn] {
        &self.inputs
    }

    /// Outputs in declaration order.
    pub fn outputs(&self) -> &[TxOut] {
        &self.outputs
    }

    /// Bytes that input `index` must have signed.
    ///
    /// Covers every input's prevout and every output, but no signature, so
    /// inputs can be signed in any order. Returns `None` if `index` is past the
    /// last input.
    pub fn signing_payload(&self, index: usize) -> Option<Vec<u8>> {
        if index >= self.inputs.len() {
            return None;
        }
        Some(signing_payload(index, &self.inputs, &self.outputs))
    }

    /// Replace the signature of input `index` and recompute the hash.
    pub fn with_signature(mut self, index: usize, signature: Vec<u8>) -> Result<Self, CoreError> {
        let len = self.inputs.len();
        let input = self
            .inputs
            .get_mut(index)
            .ok_or(CoreError::InputOutOfRange { index, len })?;
        input.signature = signature;
        self.hash = txid(&self.inputs, &self.outputs)?;
        Ok(self)
    }

    /// Identifier of this transaction's `index`-th output.
    pub fn outpoint(&self, index: u32) -> OutPoint {
        OutPoint::new(self.hash, index)
    }

    /// Iterate over the outputs created by this transaction with their identifiers.
    pub fn iter_created(&self) -> impl Iterator<Item = (OutPoint, &TxOut)> + '_ {
        self.outputs
            .iter()
            .enumerate()
            .map(move |(index, out)| (OutPoint::new(self.hash, index as u32), out))
    }

    /// Iterate over the identifiers consumed by this transaction.
    pub fn iter_spent(&self) -> impl Iterator<Item = OutPoint> + '_ {
        self.inputs.iter().map(|i| i.prevout)
    }
}
