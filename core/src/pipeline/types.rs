use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chaos::{ChaosSource, ChaosState, HyperchaoticGenerator};
use crate::constants::{DEFAULT_DT, DEFAULT_SEED, DEFAULT_STATE_TOLERANCE, DEFAULT_WARMUP};
use crate::crypto::Verification;
use crate::record::{FrameBuffer, RecordLimits};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("seed must be finite, got {0}")]
    InvalidSeed(f64),

    #[error("dt must be finite and > 0, got {0}")]
    InvalidStep(f64),

    #[error("tolerance must be finite and >= 0, got {0}")]
    InvalidTolerance(f64),

    #[error("limit {0} must be non-zero")]
    ZeroLimit(&'static str),

    #[error("config parse error: {0}")]
    Parse(String),

    /// The seed passes `validate` but the trajectory leaves the finite
    /// range during warmup.
    #[error("trajectory diverges within {warmup} warmup steps")]
    DivergentTrajectory { warmup: u64 },
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// What the decryptor does when the embedded state disagrees with its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Log, count and return the payload flagged as unverified.
    #[default]
    Warn,
    /// Discard the payload and return `PipelineError::StateMismatch`.
    Reject,
}

/// Shared settings for one encryptor/decryptor pair.
///
/// Both sides must agree on `seed`, `dt` and `warmup`; the remaining
/// fields only affect the decryptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub seed: f64,
    pub dt: f64,
    /// Steps discarded on both sides before the first unit.
    pub warmup: u64,
    pub tolerance: f64,
    pub mismatch_policy: MismatchPolicy,
    pub limits: RecordLimits,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            dt: DEFAULT_DT,
            warmup: DEFAULT_WARMUP,
            tolerance: DEFAULT_STATE_TOLERANCE,
            mismatch_policy: MismatchPolicy::Warn,
            limits: RecordLimits::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_seed(seed: f64) -> Self {
        Self { seed, ..Self::default() }
    }

    /// Parse from JSON; missing fields take their defaults. Validated.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.seed.is_finite() {
            return Err(ConfigError::InvalidSeed(self.seed));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidStep(self.dt));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.limits.max_width == 0 {
            return Err(ConfigError::ZeroLimit("max_width"));
        }
        if self.limits.max_height == 0 {
            return Err(ConfigError::ZeroLimit("max_height"));
        }
        if self.limits.max_audio_samples == 0 {
            return Err(ConfigError::ZeroLimit("max_audio_samples"));
        }
        Ok(())
    }

    /// Validate, build the generator and run the warmup.
    pub fn warmed_generator(&self) -> Result<HyperchaoticGenerator, ConfigError> {
        self.validate()?;
        let mut generator = HyperchaoticGenerator::new(self.seed, self.dt);
        generator.warmup(self.warmup);
        if !generator.state().is_finite() {
            return Err(ConfigError::DivergentTrajectory { warmup: self.warmup });
        }
        Ok(generator)
    }
}

/// Per-unit progress of a worker.
///
/// ```text
/// Idle --step+counter--> KeyReady --transform--> Transformed
///                           ^                         |
///                           +-------next unit---------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStage {
    /// No unit processed yet.
    Idle,
    /// Generator stepped and key derived for the current unit; the unit did
    /// not complete (or is in flight).
    KeyReady,
    /// Last unit completed.
    Transformed,
}

/// Output of encryption.
#[derive(Debug, Clone)]
pub struct EncryptedUnit {
    /// 1-based counter value that keyed this unit.
    pub unit_index: u64,
    /// Generator state embedded in the record.
    pub state: ChaosState,
    pub ciphertext: Bytes,
}

/// Output of decryption.
#[derive(Debug, Clone)]
pub struct DecryptedUnit {
    pub unit_index: u64,
    pub frame: FrameBuffer,
    pub audio: Option<Vec<i16>>,
    pub verification: Verification,
}

impl DecryptedUnit {
    /// False when the embedded state did not match (warn policy only).
    #[inline]
    pub fn verified(&self) -> bool {
        self.verification.is_match()
    }
}
