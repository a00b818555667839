//! hyperframe-core
//!
//! Chaos-keyed per-frame encryption engine.
//! Pure Rust, no FFI, no I/O.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Building blocks
pub mod chaos;
pub mod crypto;
pub mod record;
pub mod telemetry;

// Workers
pub mod pipeline;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::chaos::{ChaosSource, ChaosState, HyperchaoticGenerator};
    pub use crate::crypto::{IntegrityCheck, KeyMaterial, StateTolerance, Verification};
    pub use crate::pipeline::{
        DecryptedUnit, EncryptedUnit, FrameDecryptor, FrameEncryptor, MismatchPolicy,
        PipelineConfig, RawFrameCipher, UnitStage,
    };
    pub use crate::record::{FrameBuffer, RecordLimits};
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::PipelineError;
}
