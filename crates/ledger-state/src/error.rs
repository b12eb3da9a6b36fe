//! State and validation errors.

use ledger_core::{Amount, OutPoint};
use thiserror::Error;

/// Errors produced by pool accessors.
#[derive(Debug, Error)]
pub enum StateError {
    /// The outpoint is not in the unspent output pool.
    #[error("utxo not found: {0}")]
    MissingUtxo(OutPoint),
}

/// Why a transaction was rejected.
///
/// Rejection is a normal outcome; callers that only need accept/reject use
/// [`is_valid_tx`](crate::validate::is_valid_tx).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TxRejection {
    /// An input references an output that does not exist or was already spent.
    #[error("input {input} spends unknown or spent output {outpoint}")]
    UnknownOrSpentOutput {
        /// Index of the offending input.
        input: usize,
        /// Output it tried to spend.
        outpoint: OutPoint,
    },

    /// An input's signature did not verify against the spent output's owner.
    #[error("input {input} has a bad signature")]
    BadSignature {
        /// Index of the offending input.
        input: usize,
    },

    /// Two inputs of the same transaction claim the same output.
    #[error("input {input} claims {outpoint} a second time")]
    InternalDoubleSpend {
        /// Index of the second claiming input.
        input: usize,
        /// Output claimed twice.
        outpoint: OutPoint,
    },

    /// An output declares a negative value.
    #[error("output {output} has negative value {value}")]
    NegativeOutput {
        /// Index of the offending output.
        output: usize,
        /// Declared value.
        value: Amount,
    },

    /// Outputs are worth more than inputs.
    #[error("insufficient input value: have {inputs} atoms, need {outputs} atoms")]
    ValueImbalance {
        /// Sum of spent output values, in atoms.
        inputs: i128,
        /// Sum of declared output values, in atoms.
        outputs: i128,
    },

    /// More inputs than the configured bound.
    #[error("too many inputs: {count} > {max}")]
    TooManyInputs {
        /// Inputs in the transaction.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// More outputs than the configured bound.
    #[error("too many outputs: {count} > {max}")]
    TooManyOutputs {
        /// Outputs in the transaction.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
}
