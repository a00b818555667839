//! crypto/kdf.rs
//! Chaos-state key derivation.
//!
//! Design:
//! - SHA3-256(state_le(32) ‖ counter_le(8)) -> 32 bytes
//! - key = digest[0..16], iv = digest[16..32]
//!
//! The counter is the 1-based ordinal of the unit within its worker, so two
//! units never share a (key, iv) pair even if the trajectory revisits a state.

use sha3::{Digest, Sha3_256};

use crate::chaos::ChaosState;
use crate::crypto::types::{KeyMaterial, DIGEST_LEN_32};

/// Raw 32-byte digest over `state ‖ counter`.
#[inline]
pub fn kdf_digest(state: &ChaosState, counter: u64) -> [u8; DIGEST_LEN_32] {
    let mut hasher = Sha3_256::new();
    hasher.update(state.to_le_bytes());
    hasher.update(counter.to_le_bytes());
    finish(hasher)
}

/// Derive the per-unit key and IV.
#[inline]
pub fn derive_key_material(state: &ChaosState, counter: u64) -> KeyMaterial {
    KeyMaterial::from_digest(&kdf_digest(state, counter))
}

/// Derive key and IV from the state alone.
///
/// Used by the shape-preserving frame cipher, which carries no counter.
/// Prefer [`derive_key_material`] anywhere a unit ordinal is available.
#[inline]
pub fn derive_unbound_key_material(state: &ChaosState) -> KeyMaterial {
    let mut hasher = Sha3_256::new();
    hasher.update(state.to_le_bytes());
    KeyMaterial::from_digest(&finish(hasher))
}

#[inline]
fn finish(hasher: Sha3_256) -> [u8; DIGEST_LEN_32] {
    let out = hasher.finalize();
    let mut digest = [0u8; DIGEST_LEN_32];
    digest.copy_from_slice(&out);
    digest
}
