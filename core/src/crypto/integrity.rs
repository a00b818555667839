//! crypto/integrity.rs
//! Post-decryption unit verification.
//!
//! The cipher is unauthenticated, so the only built-in check compares the
//! state embedded in the decrypted record with the locally recomputed one.
//! A MAC or other tag check can replace it through [`IntegrityCheck`].

use serde::{Deserialize, Serialize};

use crate::chaos::ChaosState;
use crate::constants::DEFAULT_STATE_TOLERANCE;
use crate::crypto::types::CryptoError;
use crate::record::RecordView;

/// Result of verifying one decrypted unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Verification {
    /// Embedded state agrees with the local generator.
    Match { max_deviation: f64 },
    /// Generators desynchronized or the ciphertext was corrupted.
    Mismatch { max_deviation: f64 },
}

impl Verification {
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, Verification::Match { .. })
    }

    /// Largest component deviation seen (NaN if the embedded state was not finite).
    pub fn max_deviation(&self) -> f64 {
        match self {
            Verification::Match { max_deviation } | Verification::Mismatch { max_deviation } => {
                *max_deviation
            }
        }
    }
}

/// Pluggable check run on every decrypted record.
pub trait IntegrityCheck: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Compare the decrypted record against the locally expected state.
    fn verify(&self, expected: &ChaosState, record: &RecordView<'_>) -> Verification;
}

/// Element-wise absolute tolerance on the embedded state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateTolerance {
    tolerance: f64,
}

impl StateTolerance {
    /// Rejects NaN, infinite and negative tolerances.
    pub fn new(tolerance: f64) -> Result<Self, CryptoError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CryptoError::InvalidTolerance(tolerance));
        }
        Ok(Self { tolerance })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for StateTolerance {
    fn default() -> Self {
        Self { tolerance: DEFAULT_STATE_TOLERANCE }
    }
}

impl IntegrityCheck for StateTolerance {
    fn name(&self) -> &'static str {
        "state-tolerance"
    }

    fn verify(&self, expected: &ChaosState, record: &RecordView<'_>) -> Verification {
        let max_deviation = expected.max_abs_deviation(&record.header.state);
        // NaN never compares <=, so a poisoned state is a mismatch.
        if max_deviation <= self.tolerance {
            Verification::Match { max_deviation }
        } else {
            Verification::Mismatch { max_deviation }
        }
    }
}
