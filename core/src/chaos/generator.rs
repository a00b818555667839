//! chaos/generator.rs
//! Hyperchaotic 4-D delay system integrated with explicit Euler steps.
//!
//! ```text
//! dx/dt = -a·x(t-τx) - b·y·z
//! dy/dt = -x + c·y(t-τy) + c·w
//! dz/dt =  d - y² - z(t-τz)
//! dw/dt =  x - w
//! ```
//!
//! Every derivative is evaluated from the pre-step state and the oldest
//! history sample of each delay line; the four variables are then updated
//! together and the new x, y, z are pushed into their lines.

use tracing::{debug, info};

use crate::chaos::types::{ChaosParams, ChaosSource, ChaosState, DelayLine};
use crate::constants::chaos_params::SEED_SCALE;

/// Owned generator for one stream.
///
/// Not `Clone`: each side of a stream owns exactly one generator, and two
/// workers must never share a keystream.
#[derive(Debug)]
pub struct HyperchaoticGenerator {
    params: ChaosParams,
    state: ChaosState,
    x_hist: DelayLine,
    y_hist: DelayLine,
    z_hist: DelayLine,
    steps: u64,
}

impl HyperchaoticGenerator {
    /// Reference coefficients, initial state `(s, 2s, 3s, 4s)`.
    pub fn new(seed: f64, dt: f64) -> Self {
        Self::with_params(seed, ChaosParams::with_dt(dt))
    }

    pub fn with_params(seed: f64, params: ChaosParams) -> Self {
        let state = ChaosState::new(
            seed * SEED_SCALE[0],
            seed * SEED_SCALE[1],
            seed * SEED_SCALE[2],
            seed * SEED_SCALE[3],
        );
        let [nx, ny, nz] = params.delay_steps();
        debug!(seed, dt = params.dt, nx, ny, nz, "chaos generator initialised");

        Self {
            params,
            state,
            x_hist: DelayLine::new(nx, state.x),
            y_hist: DelayLine::new(ny, state.y),
            z_hist: DelayLine::new(nz, state.z),
            steps: 0,
        }
    }

    pub fn params(&self) -> &ChaosParams {
        &self.params
    }

    /// History lengths (delay + 1) for x, y, z.
    pub fn history_lens(&self) -> [usize; 3] {
        [self.x_hist.len(), self.y_hist.len(), self.z_hist.len()]
    }

    /// Delay lengths in steps for x, y, z.
    pub fn delay_steps(&self) -> [usize; 3] {
        self.params.delay_steps()
    }

    /// One Euler step.
    #[inline]
    pub fn step(&mut self) -> ChaosState {
        let p = &self.params;
        let ChaosState { x, y, z, w } = self.state;

        let x_tau = self.x_hist.oldest();
        let y_tau = self.y_hist.oldest();
        let z_tau = self.z_hist.oldest();

        let dx = -p.a * x_tau - p.b * y * z;
        let dy = -x + p.c * y_tau + p.c * w;
        let dz = p.d - y * y - z_tau;
        let dw = x - w;

        self.state = ChaosState::new(
            x + p.dt * dx,
            y + p.dt * dy,
            z + p.dt * dz,
            w + p.dt * dw,
        );

        self.x_hist.push(self.state.x);
        self.y_hist.push(self.state.y);
        self.z_hist.push(self.state.z);
        self.steps += 1;

        self.state
    }

    pub fn state(&self) -> ChaosState {
        self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl ChaosSource for HyperchaoticGenerator {
    fn step(&mut self) -> ChaosState {
        HyperchaoticGenerator::step(self)
    }

    fn state(&self) -> ChaosState {
        self.state
    }

    fn steps(&self) -> u64 {
        self.steps
    }

    fn warmup(&mut self, n: u64) {
        for _ in 0..n {
            HyperchaoticGenerator::step(self);
        }
        info!(discarded = n, total_steps = self.steps, "chaos generator warmed up");
    }
}
