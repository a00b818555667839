//! chaos/types.rs
//! State, parameters and delay memory for the chaotic generator.
//!
//! Design notes:
//! - All arithmetic is IEEE-754 double precision; no fused ops, no reordering.
//! - State bytes are little-endian f64 in (x, y, z, w) order. The KDF and the
//!   record codec both rely on this layout.

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::constants::chaos_params;

/// Upper bound on a single delay line, so a degenerate `dt` cannot request
/// an unbounded history allocation.
pub const MAX_DELAY_STEPS: usize = 1 << 20;

/// Byte length of a serialized state.
pub const STATE_LEN: usize = 32;

/// Snapshot of the 4-D system at one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChaosState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl ChaosState {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    pub const fn from_array(v: [f64; 4]) -> Self {
        Self { x: v[0], y: v[1], z: v[2], w: v[3] }
    }

    /// Serialize as 4 × f64 little-endian.
    #[inline]
    pub fn to_le_bytes(self) -> [u8; STATE_LEN] {
        let mut out = [0u8; STATE_LEN];
        LittleEndian::write_f64_into(&self.to_array(), &mut out);
        out
    }

    /// Inverse of [`ChaosState::to_le_bytes`]. Caller guarantees 32 bytes.
    #[inline]
    pub fn from_le_bytes(buf: &[u8; STATE_LEN]) -> Self {
        let mut v = [0f64; 4];
        LittleEndian::read_f64_into(buf, &mut v);
        Self::from_array(v)
    }

    /// Largest element-wise absolute difference.
    ///
    /// Returns NaN if any component difference is NaN, so that a tolerance
    /// comparison of the form `deviation <= tol` fails for poisoned states.
    pub fn max_abs_deviation(&self, other: &ChaosState) -> f64 {
        let mut worst = 0.0f64;
        for (a, b) in self.to_array().iter().zip(other.to_array().iter()) {
            let d = (a - b).abs();
            if d.is_nan() {
                return f64::NAN;
            }
            if d > worst {
                worst = d;
            }
        }
        worst
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl From<[f64; 4]> for ChaosState {
    fn from(v: [f64; 4]) -> Self {
        Self::from_array(v)
    }
}

/// Coefficients, delay times and step size of the delay system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaosParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tau_x: f64,
    pub tau_y: f64,
    pub tau_z: f64,
    pub dt: f64,
}

impl ChaosParams {
    /// Reference coefficients with the given integration step.
    pub fn with_dt(dt: f64) -> Self {
        Self {
            a: chaos_params::A,
            b: chaos_params::B,
            c: chaos_params::C,
            d: chaos_params::D,
            tau_x: chaos_params::TAU_X,
            tau_y: chaos_params::TAU_Y,
            tau_z: chaos_params::TAU_Z,
            dt,
        }
    }

    /// Delay lengths in steps for (x, y, z): `round(tau / dt)`.
    pub fn delay_steps(&self) -> [usize; 3] {
        [
            delay_len(self.tau_x, self.dt),
            delay_len(self.tau_y, self.dt),
            delay_len(self.tau_z, self.dt),
        ]
    }
}

impl Default for ChaosParams {
    fn default() -> Self {
        Self::with_dt(crate::constants::DEFAULT_DT)
    }
}

/// `round(tau / dt)` clamped into `0..=MAX_DELAY_STEPS`; NaN maps to 0.
#[inline]
fn delay_len(tau: f64, dt: f64) -> usize {
    let n = (tau / dt).round();
    if n.is_nan() || n <= 0.0 {
        0
    } else if n >= MAX_DELAY_STEPS as f64 {
        MAX_DELAY_STEPS
    } else {
        n as usize
    }
}

/// Fixed-length history of one variable.
///
/// Holds `delay + 1` samples. `oldest()` is the value `delay` steps before
/// the newest one; `push` overwrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayLine {
    buf: Vec<f64>,
    head: usize,
}

impl DelayLine {
    /// Build a line for `delay` steps, pre-filled with `fill`.
    pub fn new(delay: usize, fill: f64) -> Self {
        Self {
            buf: vec![fill; delay + 1],
            head: 0,
        }
    }

    #[inline]
    pub fn oldest(&self) -> f64 {
        self.buf[self.head]
    }

    /// Append `v`, evicting the oldest sample.
    #[inline]
    pub fn push(&mut self, v: f64) {
        self.buf[self.head] = v;
        self.head = (self.head + 1) % self.buf.len();
    }

    /// Number of retained samples. Constant for the line's lifetime.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// A line always retains at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Most recently pushed sample.
    #[inline]
    pub fn newest(&self) -> f64 {
        let len = self.buf.len();
        self.buf[(self.head + len - 1) % len]
    }
}

/// A deterministic state source that advances exactly once per unit.
///
/// Two sources paired across an encryptor and a decryptor must be built
/// from the same seed and parameters and stepped the same number of times.
pub trait ChaosSource {
    /// Advance one step and return the new state.
    fn step(&mut self) -> ChaosState;

    /// Current state, without advancing.
    fn state(&self) -> ChaosState;

    /// Total steps taken since construction, warmup included.
    fn steps(&self) -> u64;

    /// Discard `n` steps.
    fn warmup(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }
}
