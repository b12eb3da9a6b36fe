//! Processor configuration.
//!
//! Defaults apply exactly the validity rules and nothing more. Bounds are an
//! opt-in for hosts that want to cap per-transaction work.

use ledger_core::{MAX_INPUTS_PER_TX, MAX_OUTPUTS_PER_TX};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for an [`EpochProcessor`](crate::apply::EpochProcessor).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProcessorConfig {
    /// Reject transactions with more inputs than this.
    pub max_inputs_per_tx: Option<usize>,
    /// Reject transactions with more outputs than this.
    pub max_outputs_per_tx: Option<usize>,
    /// Log rejections at `warn` instead of `debug`.
    pub warn_on_reject: bool,
}

impl ProcessorConfig {
    /// Config bounded by the suggested per-transaction limits.
    pub fn bounded() -> Self {
        Self {
            max_inputs_per_tx: Some(MAX_INPUTS_PER_TX),
            max_outputs_per_tx: Some(MAX_OUTPUTS_PER_TX),
            warn_on_reject: false,
        }
    }
}
