//! Shape-preserving frame cipher.
//!
//! Encrypts only the pixel bytes, so the output is still an `M×N×3` frame
//! that can be displayed as noise. No header, no counter, no verification:
//! a desynchronized pair silently produces garbage.

use tracing::debug;

use crate::chaos::{ChaosSource, HyperchaoticGenerator};
use crate::crypto::{derive_unbound_key_material, KeyMaterial, UnitCipher};
use crate::record::FrameBuffer;
use crate::types::PipelineError;

use super::types::PipelineConfig;

pub struct RawFrameCipher<G: ChaosSource = HyperchaoticGenerator> {
    generator: G,
    frames: u64,
}

impl RawFrameCipher<HyperchaoticGenerator> {
    /// Uses `seed`, `dt` and `warmup` from `cfg`; the rest is ignored.
    pub fn from_config(cfg: &PipelineConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(cfg.warmed_generator()?))
    }
}

impl<G: ChaosSource> RawFrameCipher<G> {
    pub fn new(generator: G) -> Self {
        Self { generator, frames: 0 }
    }

    pub fn encrypt_frame(&mut self, frame: &FrameBuffer) -> Result<FrameBuffer, PipelineError> {
        let mut out = frame.clone();
        self.encrypt_frame_in_place(&mut out)?;
        Ok(out)
    }

    pub fn decrypt_frame(&mut self, frame: &FrameBuffer) -> Result<FrameBuffer, PipelineError> {
        let mut out = frame.clone();
        self.decrypt_frame_in_place(&mut out)?;
        Ok(out)
    }

    /// On `Diverged` the frame is left untouched.
    pub fn encrypt_frame_in_place(&mut self, frame: &mut FrameBuffer) -> Result<(), PipelineError> {
        let keys = self.next_keys()?;
        UnitCipher::new(&keys).encrypt_in_place(frame.pixels_mut());
        debug!(frame = self.frames, width = frame.width(), height = frame.height(), "raw frame encrypted");
        Ok(())
    }

    pub fn decrypt_frame_in_place(&mut self, frame: &mut FrameBuffer) -> Result<(), PipelineError> {
        let keys = self.next_keys()?;
        UnitCipher::new(&keys).decrypt_in_place(frame.pixels_mut());
        debug!(frame = self.frames, width = frame.width(), height = frame.height(), "raw frame decrypted");
        Ok(())
    }

    fn next_keys(&mut self) -> Result<KeyMaterial, PipelineError> {
        let state = self.generator.step();
        self.frames += 1;
        if !state.is_finite() {
            return Err(PipelineError::Diverged {
                unit: self.frames,
                steps: self.generator.steps(),
            });
        }
        Ok(derive_unbound_key_material(&state))
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}
