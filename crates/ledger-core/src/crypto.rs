//! Signature verification interfaces.
//!
//! Important: this crate does NOT implement cryptography. It defines the
//! verifier seam consumed by the validator and wires one audited scheme
//! (secp256k1 ECDSA via `k256`) behind it.

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::EncodedPoint;

use crate::types::PublicKey;

/// Checks that `signature` over `payload` was produced by `owner`.
///
/// Implementations must be deterministic and side-effect free. Any decoding
/// failure is a failed verification, never a panic.
pub trait SignatureVerifier {
    /// Returns `true` iff the signature is valid for this owner and payload.
    fn verify(&self, owner: &PublicKey, payload: &[u8], signature: &[u8]) -> bool;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for &V {
    fn verify(&self, owner: &PublicKey, payload: &[u8], signature: &[u8]) -> bool {
        (**self).verify(owner, payload, signature)
    }
}

/// secp256k1 ECDSA verifier: SEC1 public keys, DER signatures.
#[derive(Clone, Copy, Debug, Default)]
pub struct EcdsaVerifier;

impl SignatureVerifier for EcdsaVerifier {
    fn verify(&self, owner: &PublicKey, payload: &[u8], signature: &[u8]) -> bool {
        let Ok(vk) = VerifyingKey::from_sec1_bytes(owner.as_bytes()) else {
            return false;
        };
        let Ok(sig) = Signature::from_der(signature) else {
            return false;
        };
        vk.verify(payload, &sig).is_ok()
    }
}

/// Compressed SEC1 public key for a signing key.
pub fn public_key_of(sk: &SigningKey) -> PublicKey {
    PublicKey(EncodedPoint::from(sk.verifying_key()).as_bytes().to_vec())
}

/// Sign a payload and return the DER-encoded signature.
pub fn sign_payload(sk: &SigningKey, payload: &[u8]) -> Vec<u8> {
    let sig: Signature = sk.sign(payload);
    sig.to_der().as_bytes().to_vec()
}
