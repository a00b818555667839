#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use hyperframe_core::chaos::{ChaosParams, ChaosSource, ChaosState, DelayLine, HyperchaoticGenerator};
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Metadata, Subscriber};

    /// Collects (level, message) of every event.
    #[derive(Clone, Default)]
    struct EventLog(Arc<Mutex<Vec<(Level, String)>>>);

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl Subscriber for EventLog {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }
        fn new_span(&self, _: &Attributes<'_>) -> Id {
            Id::from_u64(1)
        }
        fn record(&self, _: &Id, _: &Record<'_>) {}
        fn record_follows_from(&self, _: &Id, _: &Id) {}
        fn event(&self, event: &Event<'_>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0.lock().unwrap().push((*event.metadata().level(), visitor.0));
        }
        fn enter(&self, _: &Id) {}
        fn exit(&self, _: &Id) {}
    }

    fn warmed(seed: f64, warmup: u64) -> HyperchaoticGenerator {
        let mut g = HyperchaoticGenerator::new(seed, 0.01);
        g.warmup(warmup);
        g
    }

    #[test]
    fn test_initial_state_scales_seed() {
        let g = HyperchaoticGenerator::new(0.5, 0.01);
        assert_eq!(g.state(), ChaosState::new(0.5, 1.0, 1.5, 2.0));
        assert_eq!(g.steps(), 0);
    }

    #[test]
    fn test_delay_lengths_at_reference_step() {
        let g = HyperchaoticGenerator::new(0.1, 0.01);
        assert_eq!(g.delay_steps(), [12, 25, 38]);
        assert_eq!(g.history_lens(), [13, 26, 39]);
    }

    #[test]
    fn test_history_lengths_fixed_after_steps() {
        let mut g = HyperchaoticGenerator::new(0.1, 0.01);
        for _ in 0..500 {
            g.step();
        }
        assert_eq!(g.history_lens(), [13, 26, 39]);
        assert_eq!(g.steps(), 500);
    }

    #[test]
    fn test_reference_trajectory_after_warmup() {
        let mut g = warmed(0.1, 1000);
        let s = g.step();

        let expected = ChaosState::new(
            1.7224573861787766,
            3.532443329180989,
            -0.4777985618084932,
            -4.903227748782603,
        );
        assert!(s.max_abs_deviation(&expected) < 1e-9, "got {:?}", s);
        assert!(s.is_finite());
    }

    #[test]
    fn test_first_step_uses_initial_history() {
        // Before any push the delayed terms equal the initial values.
        let mut g = HyperchaoticGenerator::new(0.1, 0.01);
        let p = ChaosParams::default();
        let (x, y, z, w) = (0.1 * 1.0, 0.1 * 2.0, 0.1 * 3.0, 0.1 * 4.0);
        let s = g.step();

        let ex = x + p.dt * (-p.a * x - p.b * y * z);
        let ey = y + p.dt * (-x + p.c * y + p.c * w);
        let ez = z + p.dt * (p.d - y * y - z);
        let ew = w + p.dt * (x - w);
        assert_eq!(s, ChaosState::new(ex, ey, ez, ew));
    }

    #[test]
    fn test_one_step_offset_is_detectable() {
        let mut a = warmed(0.1, 1000);
        let mut b = warmed(0.1, 1001);
        let sa = a.step();
        let sb = b.step();
        assert!(sa.max_abs_deviation(&sb) > 1e-3);
    }

    #[test]
    fn test_state_le_bytes_layout() {
        let s = ChaosState::new(1.0, 2.0, 3.0, 4.0);
        let bytes = s.to_le_bytes();
        assert_eq!(&bytes[0..8], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[24..32], &4.0f64.to_le_bytes());
        assert_eq!(ChaosState::from_le_bytes(&bytes), s);
    }

    #[test]
    fn test_deviation_nan_is_nan() {
        let a = ChaosState::new(0.0, 0.0, 0.0, 0.0);
        let b = ChaosState::new(f64::NAN, 0.0, 0.0, 0.0);
        assert!(a.max_abs_deviation(&b).is_nan());
        assert!(!b.is_finite());
    }

    #[test]
    fn test_delay_line_oldest_lags_by_delay() {
        let mut line = DelayLine::new(2, 0.0);
        assert_eq!(line.len(), 3);
        line.push(1.0);
        line.push(2.0);
        assert_eq!(line.oldest(), 0.0);
        line.push(3.0);
        assert_eq!(line.oldest(), 1.0);
        assert_eq!(line.newest(), 3.0);
    }

    #[test]
    fn test_warmup_logged_at_info() {
        let log = EventLog::default();
        tracing::subscriber::with_default(log.clone(), || {
            warmed(0.1, 10);
        });

        let events = log.0.lock().unwrap();
        assert!(events.contains(&(Level::DEBUG, "chaos generator initialised".to_string())));
        assert!(events.contains(&(Level::INFO, "chaos generator warmed up".to_string())));
    }

    proptest! {
        // Two generators with identical parameters agree bit-for-bit.
        #[test]
        fn prop_generators_deterministic(seed in -0.5f64..0.5, steps in 0usize..400) {
            let mut a = HyperchaoticGenerator::new(seed, 0.01);
            let mut b = HyperchaoticGenerator::new(seed, 0.01);
            for _ in 0..steps {
                prop_assert_eq!(a.step(), b.step());
            }
            prop_assert_eq!(a.state(), b.state());
            prop_assert_eq!(a.steps(), steps as u64);
        }
    }
}
