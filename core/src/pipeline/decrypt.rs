use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::chaos::{ChaosSource, HyperchaoticGenerator};
use crate::crypto::{derive_key_material, IntegrityCheck, StateTolerance, UnitCipher};
use crate::record::{decode_record_with_limits, RecordHeader, RecordLimits};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::PipelineError;

use super::types::{DecryptedUnit, MismatchPolicy, PipelineConfig, UnitStage};

/// Receiver side of a stream. Must be stepped in lockstep with the sender.
pub struct FrameDecryptor<G: ChaosSource = HyperchaoticGenerator> {
    generator: G,
    counter: u64,
    stage: UnitStage,
    check: Box<dyn IntegrityCheck>,
    policy: MismatchPolicy,
    limits: RecordLimits,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl FrameDecryptor<HyperchaoticGenerator> {
    /// Build the generator from `cfg`, run its warmup and apply tolerance,
    /// policy and limits.
    pub fn from_config(cfg: &PipelineConfig) -> Result<Self, PipelineError> {
        let generator = cfg.warmed_generator()?;
        info!(
            seed = cfg.seed,
            dt = cfg.dt,
            warmup = cfg.warmup,
            policy = ?cfg.mismatch_policy,
            "frame decryptor ready"
        );

        Ok(Self::new(generator)
            .with_integrity_check(Box::new(StateTolerance::new(cfg.tolerance)?))
            .with_policy(cfg.mismatch_policy)
            .with_limits(cfg.limits))
    }
}

impl<G: ChaosSource> FrameDecryptor<G> {
    /// Wrap an already warmed-up generator. Default tolerance, warn policy,
    /// default limits.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            counter: 0,
            stage: UnitStage::Idle,
            check: Box::new(StateTolerance::default()),
            policy: MismatchPolicy::default(),
            limits: RecordLimits::default(),
            counters: TelemetryCounters::default(),
            timer: TelemetryTimer::new(),
        }
    }

    pub fn with_integrity_check(mut self, check: Box<dyn IntegrityCheck>) -> Self {
        self.check = check;
        self
    }

    pub fn with_policy(mut self, policy: MismatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_limits(mut self, limits: RecordLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Decrypt one unit.
    ///
    /// The generator is stepped before anything else, so a failed unit still
    /// consumes its position and the next call stays aligned with the sender.
    pub fn decrypt(&mut self, ciphertext: impl AsRef<[u8]>) -> Result<DecryptedUnit, PipelineError> {
        let ciphertext = ciphertext.as_ref();

        // 1. Step + counter
        let expected = self.timer.time(Stage::Step, || self.generator.step());
        self.counter += 1;
        let unit_index = self.counter;
        if !expected.is_finite() {
            return Err(PipelineError::Diverged {
                unit: unit_index,
                steps: self.generator.steps(),
            });
        }
        self.stage = UnitStage::KeyReady;

        // 2. Key material from the local state
        let keys = self
            .timer
            .time(Stage::Derive, || derive_key_material(&expected, unit_index));

        // 3. Decrypt into a scratch buffer wiped on drop
        let mut buf = Zeroizing::new(ciphertext.to_vec());
        self.timer
            .time(Stage::Decrypt, || UnitCipher::new(&keys).decrypt_in_place(&mut buf));

        // 4. Parse under the configured limits
        let limits = self.limits;
        let view = match self
            .timer
            .time(Stage::Decode, || decode_record_with_limits(&buf, &limits))
        {
            Ok(view) => view,
            Err(e) => {
                self.counters.add_decode_failure();
                debug!(unit = unit_index, error = %e, "unit failed to decode");
                return Err(e.into());
            }
        };

        // 5. Compare embedded state with the local one
        let check = &self.check;
        let verification = self.timer.time(Stage::Verify, || check.verify(&expected, &view));
        if !verification.is_match() {
            self.counters.add_mismatch();
            warn!(
                unit = unit_index,
                max_deviation = verification.max_deviation(),
                check = self.check.name(),
                "embedded state does not match local generator"
            );
            if self.policy == MismatchPolicy::Reject {
                self.counters.add_rejected();
                return Err(PipelineError::StateMismatch {
                    unit: unit_index,
                    max_deviation: verification.max_deviation(),
                });
            }
        }

        // 6. Owned payload
        let record = view.to_record();
        let payload_len = ciphertext.len() - RecordHeader::LEN;
        self.counters.add_decrypt(payload_len, ciphertext.len());
        self.stage = UnitStage::Transformed;
        debug!(
            unit = unit_index,
            width = record.header.width,
            height = record.header.height,
            audio_samples = record.header.audio_samples,
            verified = verification.is_match(),
            "unit decrypted"
        );

        Ok(DecryptedUnit {
            unit_index,
            frame: record.frame,
            audio: record.audio,
            verification,
        })
    }

    pub fn stage(&self) -> UnitStage {
        self.stage
    }

    /// Units consumed so far, failed ones included.
    pub fn units_processed(&self) -> u64 {
        self.counter
    }

    pub fn policy(&self) -> MismatchPolicy {
        self.policy
    }

    pub fn limits(&self) -> &RecordLimits {
        &self.limits
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters, &self.timer, self.generator.steps())
    }
}
