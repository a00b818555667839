//! telemetry/counters.rs
//! Mutable counters updated once per processed unit.
//!
//! Summary: unit counts, byte counts and verification outcomes.
//! Converted into an immutable `TelemetrySnapshot` on request.

use std::ops::AddAssign;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Deterministic counters collected by one encryptor or decryptor.
#[derive(Default, Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub units_encrypted: u64,
    pub units_decrypted: u64,
    /// Pixel + audio bytes supplied or recovered.
    pub bytes_payload: u64,
    /// Serialized record bytes (header included) fed to or produced by the cipher.
    pub bytes_record: u64,
    pub bytes_ciphertext: u64,
    pub state_mismatches: u64,
    pub units_rejected: u64,
    pub decode_failures: u64,
}

impl TelemetryCounters {
    /// Record one encrypted unit.
    ///
    /// - `payload_len`: pixel bytes + audio bytes
    /// - `record_len`: serialized length, equal to the ciphertext length
    pub fn add_encrypt(&mut self, payload_len: usize, record_len: usize) {
        self.units_encrypted += 1;
        self.bytes_payload += payload_len as u64;
        self.bytes_record += record_len as u64;
        self.bytes_ciphertext += record_len as u64;
    }

    /// Record one decrypted unit that decoded successfully.
    pub fn add_decrypt(&mut self, payload_len: usize, ciphertext_len: usize) {
        self.units_decrypted += 1;
        self.bytes_payload += payload_len as u64;
        self.bytes_record += ciphertext_len as u64;
        self.bytes_ciphertext += ciphertext_len as u64;
    }

    pub fn add_mismatch(&mut self) {
        self.state_mismatches += 1;
    }

    pub fn add_rejected(&mut self) {
        self.units_rejected += 1;
    }

    pub fn add_decode_failure(&mut self) {
        self.decode_failures += 1;
    }

    /// Header bytes spent across all processed units.
    pub fn framing_overhead_bytes(&self) -> u64 {
        self.bytes_record.saturating_sub(self.bytes_payload)
    }

    // Workers keep their own counters; merge at the end instead of sharing.
    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.units_encrypted += other.units_encrypted;
        self.units_decrypted += other.units_decrypted;
        self.bytes_payload += other.bytes_payload;
        self.bytes_record += other.bytes_record;
        self.bytes_ciphertext += other.bytes_ciphertext;
        self.state_mismatches += other.state_mismatches;
        self.units_rejected += other.units_rejected;
        self.decode_failures += other.decode_failures;
    }

    /// Compact binary checkpoint of the counters.
    pub fn encode_checkpoint(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    pub fn decode_checkpoint(bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let (counters, _read) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(counters)
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
