//! Transaction validity against the unspent output pool.
//!
//! Checks, in order, stopping at the first failure:
//! - every input spends an output present in the pool
//! - every input is signed by the owner of the output it spends
//! - no output is claimed twice by the same transaction
//! - no output declares a negative value
//! - inputs are worth at least as much as outputs (the rest is a fee)
//!
//! Validation never mutates the pool.

use hashbrown::HashSet;

use ledger_core::{Amount, SignatureVerifier, Transaction};

use crate::config::ProcessorConfig;
use crate::error::TxRejection;
use crate::utxo::UtxoPool;

/// Validate `tx` against `pool` and return the implicit fee on success.
///
/// Totals are kept in `i128` atoms, so the conservation check is exact for any
/// number of `i64` values. A fee above `i64::MAX` is reported saturated.
pub fn validate_tx<V: SignatureVerifier>(
    tx: &Transaction,
    pool: &UtxoPool,
    verifier: &V,
) -> Result<Amount, TxRejection> {
    let mut claimed = HashSet::with_capacity(tx.inputs().len());
    let mut input_total: i128 = 0;

    for (i, input) in tx.inputs().iter().enumerate() {
        let spent = pool
            .get(&input.prevout)
            .ok_or(TxRejection::UnknownOrSpentOutput {
                input: i,
                outpoint: input.prevout,
            })?;

        let Some(payload) = tx.signing_payload(i) else {
            return Err(TxRejection::BadSignature { input: i });
        };
        if !verifier.verify(&spent.owner, &payload, &input.signature) {
            return Err(TxRejection::BadSignature { input: i });
        }

        if !claimed.insert(input.prevout) {
            return Err(TxRejection::InternalDoubleSpend {
                input: i,
                outpoint: input.prevout,
            });
        }

        input_total += i128::from(spent.value.atoms());
    }

    let mut output_total: i128 = 0;
    for (o, output) in tx.outputs().iter().enumerate() {
        if output.value.is_negative() {
            return Err(TxRejection::NegativeOutput {
                output: o,
                value: output.value,
            });
        }
        output_total += i128::from(output.value.atoms());
    }

    if input_total < output_total {
        return Err(TxRejection::ValueImbalance {
            inputs: input_total,
            outputs: output_total,
        });
    }

    let fee = i64::try_from(input_total - output_total).unwrap_or(i64::MAX);
    Ok(Amount::from_atoms(fee))
}

/// Accept/reject form of [`validate_tx`].
pub fn is_valid_tx<V: SignatureVerifier>(tx: &Transaction, pool: &UtxoPool, verifier: &V) -> bool {
    validate_tx(tx, pool, verifier).is_ok()
}

/// Enforce the optional per-transaction bounds from `cfg`.
pub fn check_bounds(tx: &Transaction, cfg: &ProcessorConfig) -> Result<(), TxRejection> {
    if let Some(max) = cfg.max_inputs_per_tx {
        if tx.inputs().len() > max {
            return Err(TxRejection::TooManyInputs {
                count: tx.inputs().len(),
                max,
            });
        }
    }
    if let Some(max) = cfg.max_outputs_per_tx {
        if tx.outputs().len() > max {
            return Err(TxRejection::TooManyOutputs {
                count: tx.outputs().len(),
                max,
            });
        }
    }
    Ok(())
}

/// Bounds from `cfg`, then the validity rules.
pub fn validate_tx_with_config<V: SignatureVerifier>(
    tx: &Transaction,
    pool: &UtxoPool,
    verifier: &V,
    cfg: &ProcessorConfig,
) -> Result<Amount, TxRejection> {
    check_bounds(tx, cfg)?;
    validate_tx(tx, pool, verifier)
}
