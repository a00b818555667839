use thiserror::Error;

use crate::crypto::CryptoError;
use crate::pipeline::ConfigError;
use crate::record::RecordError;

/// Unified pipeline error covering codec, crypto, configuration and verification.
/// - `From<T>` impls enable `?` across the layers.
/// - Every error is local to one unit; paired generators stay in lockstep.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Record serialization or parsing failed.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Key or IV material of the wrong size.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Embedded state disagrees with the local generator (reject policy only).
    #[error("state mismatch on unit {unit}: max deviation {max_deviation}")]
    StateMismatch { unit: u64, max_deviation: f64 },

    /// Caller supplied a unit the pipeline cannot process. The generator was not stepped.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The generator produced a non-finite state. Nothing was emitted for the
    /// unit; every later unit fails the same way.
    #[error("chaos trajectory diverged on unit {unit} (step {steps})")]
    Diverged { unit: u64, steps: u64 },
}
