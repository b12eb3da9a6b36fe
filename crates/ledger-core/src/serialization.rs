// Consensus-critical. Changes require a format bump + tests.
//! Canonical serialization helpers.
//!
//! Rule: transaction ids are computed over Borsh encodings. Signing payloads
//! use a fixed little-endian layout so they can never fail to encode.

use crate::constants::*;
use crate::types::{CoreError, Hash32, TxId, TxIn, TxOut};
use borsh::to_vec;

/// Encode a value with canonical Borsh encoding.
pub fn to_bytes<T: borsh::BorshSerialize + ?Sized>(v: &T) -> Result<Vec<u8>, CoreError> {
    to_vec(v).map_err(|_| CoreError::InvalidValue("borsh serialization failed"))
}

/// Hash bytes with blake3 and return 32 bytes.
pub fn hash32(domain_sep: &[u8], bytes: &[u8]) -> Hash32 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(domain_sep);
    hasher.update(bytes);
    let out = hasher.finalize();
    let mut arr = [0u8; HASH32_LEN];
    arr.copy_from_slice(out.as_bytes());
    Hash32(arr)
}

/// Canonical transaction id = BLAKE3(DS_TX || borsh(inputs) || borsh(outputs)).
pub fn txid(inputs: &[TxIn], outputs: &[TxOut]) -> Result<TxId, CoreError> {
    let mut bytes = to_bytes(inputs)?;
    bytes.extend_from_slice(&to_bytes(outputs)?);
    if bytes.len() > MAX_TX_BYTES {
        return Err(CoreError::InvalidValue("tx exceeds MAX_TX_BYTES"));
    }
    Ok(hash32(DS_TX, &bytes))
}

/// Signing payload for input `index`:
/// BLAKE3(DS_SIGHASH || index || prevouts || outputs), signatures excluded.
pub fn signing_payload(index: usize, inputs: &[TxIn], outputs: &[TxOut]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&(index as u64).to_le_bytes());
    data.extend_from_slice(&(inputs.len() as u64).to_le_bytes());
    for inp in inputs {
        data.extend_from_slice(inp.prevout.txid.as_bytes());
        data.extend_from_slice(&inp.prevout.index.to_le_bytes());
    }
    data.extend_from_slice(&(outputs.len() as u64).to_le_bytes());
    for out in outputs {
        data.extend_from_slice(&out.value.atoms().to_le_bytes());
        data.extend_from_slice(&(out.owner.as_bytes().len() as u64).to_le_bytes());
        data.extend_from_slice(out.owner.as_bytes());
    }
    hash32(DS_SIGHASH, &data).as_bytes().to_vec()
}
