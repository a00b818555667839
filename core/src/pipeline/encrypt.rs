use bytes::Bytes;
use tracing::{debug, info};

use crate::chaos::{ChaosSource, ChaosState, HyperchaoticGenerator};
use crate::crypto::{derive_key_material, UnitCipher};
use crate::record::{encode_record, FrameBuffer, RecordError, RecordHeader, RecordLimits};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::PipelineError;

use super::types::{EncryptedUnit, PipelineConfig, UnitStage};

/// Sender side of a stream: one generator, one unit counter.
pub struct FrameEncryptor<G: ChaosSource = HyperchaoticGenerator> {
    generator: G,
    counter: u64,
    stage: UnitStage,
    limits: RecordLimits,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl FrameEncryptor<HyperchaoticGenerator> {
    /// Build the generator from `cfg` and run its warmup.
    pub fn from_config(cfg: &PipelineConfig) -> Result<Self, PipelineError> {
        let generator = cfg.warmed_generator()?;
        info!(seed = cfg.seed, dt = cfg.dt, warmup = cfg.warmup, "frame encryptor ready");

        Ok(Self::new(generator).with_limits(cfg.limits))
    }
}

impl<G: ChaosSource> FrameEncryptor<G> {
    /// Wrap an already warmed-up generator.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            counter: 0,
            stage: UnitStage::Idle,
            limits: RecordLimits::default(),
            counters: TelemetryCounters::default(),
            timer: TelemetryTimer::new(),
        }
    }

    /// Refuse units the paired decryptor would reject.
    pub fn with_limits(mut self, limits: RecordLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Encrypt one unit.
    ///
    /// Input is validated before the generator moves: an `InvalidInput`
    /// error leaves the stream position untouched.
    pub fn encrypt(
        &mut self,
        frame: &FrameBuffer,
        audio: Option<&[i16]>,
    ) -> Result<EncryptedUnit, PipelineError> {
        self.validate_unit(frame, audio)?;

        // 1. Step + counter
        let state = self.timer.time(Stage::Step, || self.generator.step());
        self.counter += 1;
        let unit_index = self.counter;
        if !state.is_finite() {
            return Err(PipelineError::Diverged {
                unit: unit_index,
                steps: self.generator.steps(),
            });
        }
        self.stage = UnitStage::KeyReady;

        // 2. Key material bound to (state, counter)
        let keys = self
            .timer
            .time(Stage::Derive, || derive_key_material(&state, unit_index));

        // 3. Serialize with the state embedded
        let mut buf = self
            .timer
            .time(Stage::Encode, || encode_record(frame, audio, &state))?;
        let record_len = buf.len();

        // 4. Whole-record CFB
        self.timer
            .time(Stage::Encrypt, || UnitCipher::new(&keys).encrypt_in_place(&mut buf));

        let payload_len = record_len - RecordHeader::LEN;
        self.counters.add_encrypt(payload_len, record_len);
        self.stage = UnitStage::Transformed;
        debug!(
            unit = unit_index,
            width = frame.width(),
            height = frame.height(),
            audio_samples = audio.map_or(0, <[i16]>::len),
            bytes = record_len,
            "unit encrypted"
        );

        Ok(EncryptedUnit {
            unit_index,
            state,
            ciphertext: Bytes::from(buf),
        })
    }

    fn validate_unit(&self, frame: &FrameBuffer, audio: Option<&[i16]>) -> Result<(), PipelineError> {
        let samples = audio.map_or(0, <[i16]>::len);
        let header = RecordHeader {
            width: frame.width(),
            height: frame.height(),
            audio_samples: u32::try_from(samples)
                .map_err(|_| invalid(RecordError::TooManySamples(samples)))?,
            state: ChaosState::default(),
        };

        let expected = header.pixel_len().map_err(invalid)?;
        if frame.pixels().len() != expected {
            return Err(invalid(RecordError::PayloadSize {
                expected,
                actual: frame.pixels().len(),
            }));
        }
        header.record_len().map_err(invalid)?;
        self.limits.check(&header).map_err(invalid)?;
        Ok(())
    }

    pub fn stage(&self) -> UnitStage {
        self.stage
    }

    /// Units keyed so far (the counter value of the last unit).
    pub fn units_processed(&self) -> u64 {
        self.counter
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn limits(&self) -> &RecordLimits {
        &self.limits
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer, self.generator.steps())
    }
}

fn invalid(e: RecordError) -> PipelineError {
    PipelineError::InvalidInput(e.to_string())
}
