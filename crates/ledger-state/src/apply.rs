//! Epoch processing: greedy, in-order application of candidate transactions.

use ledger_core::{Amount, EcdsaVerifier, SignatureVerifier, Transaction, TxId};
use tracing::{debug, info, warn};

use crate::config::ProcessorConfig;
use crate::error::TxRejection;
use crate::utxo::UtxoPool;
use crate::validate::validate_tx_with_config;

/// A candidate that was not applied, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejected {
    /// Position of the transaction in the submitted batch.
    pub position: usize,
    /// Transaction id.
    pub txid: TxId,
    /// Why it was rejected.
    pub reason: TxRejection,
}

/// Outcome of one epoch.
#[derive(Clone, Debug, Default)]
pub struct EpochReport {
    /// Epoch number (1-based) this report belongs to.
    pub epoch: u64,
    /// Accepted transactions, in submission order.
    pub accepted: Vec<Transaction>,
    /// Rejected candidates, in submission order.
    pub rejected: Vec<Rejected>,
    /// Value destroyed as fees by the accepted transactions.
    pub fees: Amount,
}

/// Owns the unspent output pool and advances it one epoch at a time.
///
/// Candidates are considered exactly once, in the order given, each against
/// the pool as left by the previously accepted candidates of the same batch.
/// A rejected candidate never touches the pool.
#[derive(Clone, Debug)]
pub struct EpochProcessor<V = EcdsaVerifier> {
    pool: UtxoPool,
    verifier: V,
    config: ProcessorConfig,
    epoch: u64,
}

impl EpochProcessor<EcdsaVerifier> {
    /// Create a processor over a private copy of `pool`.
    pub fn new(pool: &UtxoPool) -> Self {
        Self::with_config(pool, ProcessorConfig::default())
    }

    /// Create a processor with an explicit configuration.
    pub fn with_config(pool: &UtxoPool, config: ProcessorConfig) -> Self {
        Self::with_verifier(pool, config, EcdsaVerifier)
    }
}

impl<V: SignatureVerifier> EpochProcessor<V> {
    /// Create a processor with a custom signature verifier.
    pub fn with_verifier(pool: &UtxoPool, config: ProcessorConfig, verifier: V) -> Self {
        Self {
            pool: pool.clone(),
            verifier,
            config,
            epoch: 0,
        }
    }

    /// Current unspent output pool.
    pub fn pool(&self) -> &UtxoPool {
        &self.pool
    }

    /// Consume the processor and return its pool.
    pub fn into_pool(self) -> UtxoPool {
        self.pool
    }

    /// Number of epochs applied so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Active configuration.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Validate `tx` against the current pool without applying it.
    pub fn validate_tx(&self, tx: &Transaction) -> Result<Amount, TxRejection> {
        validate_tx_with_config(tx, &self.pool, &self.verifier, &self.config)
    }

    /// Accept/reject form of [`Self::validate_tx`].
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        self.validate_tx(tx).is_ok()
    }

    /// Apply one epoch and return the accepted transactions in submission order.
    pub fn apply_epoch(&mut self, candidates: &[Transaction]) -> Vec<Transaction> {
        self.apply_epoch_report(candidates).accepted
    }

    /// Apply one epoch and return accepted transactions plus rejection reasons.
    pub fn apply_epoch_report(&mut self, candidates: &[Transaction]) -> EpochReport {
        self.epoch = self.epoch.saturating_add(1);
        let mut report = EpochReport {
            epoch: self.epoch,
            ..EpochReport::default()
        };

        for (position, tx) in candidates.iter().enumerate() {
            match self.validate_tx(tx) {
                Ok(fee) => {
                    self.apply_valid_tx(tx);
                    // Saturates; an overflowing fee total never aborts the batch.
                    report.fees = report.fees.checked_add(fee).unwrap_or(Amount(i64::MAX));
                    debug!(epoch = self.epoch, position, txid = %tx.hash(), fee = %fee, "accepted");
                    report.accepted.push(tx.clone());
                }
                Err(reason) => {
                    if self.config.warn_on_reject {
                        warn!(
                            epoch = self.epoch,
                            position,
                            txid = %tx.hash(),
                            %reason,
                            "rejected"
                        );
                    } else {
                        debug!(
                            epoch = self.epoch,
                            position,
                            txid = %tx.hash(),
                            %reason,
                            "rejected"
                        );
                    }
                    report.rejected.push(Rejected {
                        position,
                        txid: tx.hash(),
                        reason,
                    });
                }
            }
        }

        info!(
            epoch = self.epoch,
            candidates = candidates.len(),
            accepted = report.accepted.len(),
            pool_size = self.pool.len(),
            "epoch applied"
        );
        report
    }

    /// Spend the inputs and create the outputs of an already-validated tx.
    fn apply_valid_tx(&mut self, tx: &Transaction) {
        for op in tx.iter_spent() {
            self.pool.remove(&op);
        }
        for (op, out) in tx.iter_created() {
            self.pool.insert(op, out.clone());
        }
    }
}
