//! constants.rs
//! Wire constants and default parameters shared by every layer.

/// Magic tag at offset 0 of every serialized unit record.
// Kept as `[u8; 4]` so the type itself enforces "exactly 4 bytes" and matches the header field.
pub const RECORD_MAGIC: [u8; 4] = *b"MNAK";

/// Fixed record header: magic + width + height + audio samples + 4×f64 state.
pub const RECORD_HEADER_LEN: usize = 4 // magic
    + 4                               // width  (M)
    + 4                               // height (N)
    + 4                               // audio samples (A)
    + 32;                             // chaotic state (4 × f64)

/// Channels per pixel in the primary payload.
pub const PIXEL_CHANNELS: usize = 3;

/// Bytes per secondary (audio) sample: signed 16-bit PCM.
pub const AUDIO_SAMPLE_BYTES: usize = 2;

/// Seed used by the reference stream configuration.
pub const DEFAULT_SEED: f64 = 0.1;

/// Euler integration step.
pub const DEFAULT_DT: f64 = 0.01;

/// Discarded generator steps before the first unit.
pub const DEFAULT_WARMUP: u64 = 1000;

/// Absolute per-component tolerance when comparing recomputed and embedded state.
pub const DEFAULT_STATE_TOLERANCE: f64 = 1e-6;

/// Header sanity bounds applied by the pipeline before slicing payloads.
pub const DEFAULT_MAX_WIDTH: u32 = 8192;
pub const DEFAULT_MAX_HEIGHT: u32 = 8192;
pub const DEFAULT_MAX_AUDIO_SAMPLES: u32 = 1 << 20;

/// Coefficients of the 4-D delay system.
pub mod chaos_params {
    pub const A: f64 = 2.0;
    pub const B: f64 = 2.0;
    pub const C: f64 = 0.5;
    pub const D: f64 = 14.5;

    /// Delay times for x, y and z respectively.
    pub const TAU_X: f64 = 0.12;
    pub const TAU_Y: f64 = 0.25;
    pub const TAU_Z: f64 = 0.38;

    /// Initial state is `seed * SEED_SCALE[i]` for (x, y, z, w).
    pub const SEED_SCALE: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
}
