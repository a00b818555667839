//! Per-unit encryption workers.
//!
//! Responsibilities:
//! - Step the generator once per unit
//! - Derive key/IV bound to (state, counter)
//! - Encode / decode records
//! - Verify the embedded state after decryption
//!
//! Non-responsibilities:
//! - IO
//! - Threading
//! - Ordering or retransmission of units

pub mod types;
pub mod encrypt;
pub mod decrypt;
pub mod raw;

pub use types::{
    ConfigError,
    DecryptedUnit,
    EncryptedUnit,
    MismatchPolicy,
    PipelineConfig,
    UnitStage,
};
pub use encrypt::FrameEncryptor;
pub use decrypt::FrameDecryptor;
pub use raw::RawFrameCipher;
