//! Unspent output pool.
//!
//! In-memory map from [`OutPoint`] to the [`TxOut`] it names. Persistence, if
//! any, belongs to the host.
//!
//! Requirements:
//! - membership checks must be fast
//! - keys compare by value, never by identity
//! - iteration order does not matter for validation (only presence/absence)

use hashbrown::HashMap;

use ledger_core::{Amount, CoreError, OutPoint, TxOut};

use crate::error::StateError;

/// The set of currently unspent outputs.
///
/// `Clone` produces an independent copy; the epoch processor relies on this to
/// never alias a caller's snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UtxoPool {
    utxos: HashMap<OutPoint, TxOut>,
}

impl UtxoPool {
    /// Create a new empty pool.
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    /// Returns `true` if the outpoint is unspent.
    pub fn contains(&self, op: &OutPoint) -> bool {
        self.utxos.contains_key(op)
    }

    /// Look up the output for an outpoint.
    pub fn get(&self, op: &OutPoint) -> Option<&TxOut> {
        self.utxos.get(op)
    }

    /// Look up the output for an outpoint, treating absence as an error.
    pub fn try_get(&self, op: &OutPoint) -> Result<&TxOut, StateError> {
        self.utxos.get(op).ok_or(StateError::MissingUtxo(*op))
    }

    /// Add or overwrite the entry for `op`.
    ///
    /// Returns the previous output if one was replaced.
    pub fn insert(&mut self, op: OutPoint, out: TxOut) -> Option<TxOut> {
        self.utxos.insert(op, out)
    }

    /// Remove the entry for `op`. Removing an absent key is a no-op.
    pub fn remove(&mut self, op: &OutPoint) -> Option<TxOut> {
        self.utxos.remove(op)
    }

    /// Number of unspent outputs tracked.
    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// All unspent outpoints, in no particular order.
    pub fn outpoints(&self) -> Vec<OutPoint> {
        self.utxos.keys().copied().collect()
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&OutPoint, &TxOut)> + '_ {
        self.utxos.iter()
    }

    /// Sum of all unspent values.
    pub fn total_value(&self) -> Result<Amount, CoreError> {
        self.utxos
            .values()
            .try_fold(Amount::zero(), |acc, out| acc.checked_add(out.value))
    }
}

impl FromIterator<(OutPoint, TxOut)> for UtxoPool {
    fn from_iter<I: IntoIterator<Item = (OutPoint, TxOut)>>(iter: I) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}

impl Extend<(OutPoint, TxOut)> for UtxoPool {
    fn extend<I: IntoIterator<Item = (OutPoint, TxOut)>>(&mut self, iter: I) {
        self.utxos.extend(iter);
    }
}
