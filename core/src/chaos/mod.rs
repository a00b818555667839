//! Deterministic chaotic state generation.
//!
//! Responsibilities:
//! - Integrate the 4-D delay system one step per unit
//! - Keep fixed-length delay histories
//! - Expose state snapshots for key derivation and record embedding
//!
//! Non-responsibilities:
//! - Hashing or key material
//! - Entropy collection (everything here is reproducible from the seed)

pub mod types;
pub mod generator;

pub use types::{ChaosParams, ChaosSource, ChaosState, DelayLine, STATE_LEN};
pub use generator::HyperchaoticGenerator;
