#[cfg(test)]
mod telemetry_tests {
    use std::time::Duration;

    use hyperframe_core::pipeline::{FrameDecryptor, FrameEncryptor, PipelineConfig};
    use hyperframe_core::record::FrameBuffer;
    use hyperframe_core::telemetry::{Stage, StageTimes, TelemetryCounters, TelemetryTimer};

    fn make_counters() -> TelemetryCounters {
        TelemetryCounters {
            units_encrypted: 3,
            units_decrypted: 2,
            bytes_payload: 500,
            bytes_record: 740,
            bytes_ciphertext: 740,
            state_mismatches: 1,
            units_rejected: 0,
            decode_failures: 4,
        }
    }

    #[test]
    fn stage_times_accumulate() {
        let mut times = StageTimes::default();
        times.add(Stage::Step, Duration::from_micros(5));
        times.add(Stage::Step, Duration::from_micros(7));
        times.add(Stage::Encrypt, Duration::from_micros(10));

        assert_eq!(times.get(Stage::Step), Duration::from_micros(12));
        assert_eq!(times.get(Stage::Verify), Duration::ZERO);
        assert_eq!(times.total(), Duration::from_micros(22));
        assert!(times.has_all(&[Stage::Step, Stage::Encrypt]));
        assert!(!times.has_all(&[Stage::Decode]));
    }

    #[test]
    fn timer_charges_closure_to_stage() {
        let mut timer = TelemetryTimer::new();
        let v = timer.time(Stage::Derive, || {
            std::thread::sleep(Duration::from_millis(2));
            7
        });
        assert_eq!(v, 7);
        assert!(timer.stage_times.get(Stage::Derive) >= Duration::from_millis(2));
        assert!(timer.elapsed() >= timer.stage_times.total());
    }

    #[test]
    fn counters_merge_and_overhead() {
        let mut a = make_counters();
        a += make_counters();
        assert_eq!(a.units_encrypted, 6);
        assert_eq!(a.decode_failures, 8);
        assert_eq!(a.framing_overhead_bytes(), 2 * 240);
    }

    #[test]
    fn counters_checkpoint_round_trip() {
        let counters = make_counters();
        let bytes = counters.encode_checkpoint().unwrap();
        assert_eq!(TelemetryCounters::decode_checkpoint(&bytes).unwrap(), counters);
        assert!(TelemetryCounters::decode_checkpoint(&bytes[..2]).is_err());
    }

    #[test]
    fn worker_telemetry_counts_units() {
        let cfg = PipelineConfig::default();
        let mut enc = FrameEncryptor::from_config(&cfg).unwrap();
        let mut dec = FrameDecryptor::from_config(&cfg).unwrap();
        let frame = FrameBuffer::zeroed(4, 4).unwrap();

        for _ in 0..2 {
            let unit = enc.encrypt(&frame, Some(&[1i16, 2, 3][..])).unwrap();
            dec.decrypt(&unit.ciphertext).unwrap();
        }

        let snap = enc.telemetry();
        assert_eq!(snap.counters.units_encrypted, 2);
        assert_eq!(snap.counters.bytes_payload, 2 * (48 + 6));
        assert_eq!(snap.counters.bytes_record, 2 * (48 + 48 + 6));
        assert_eq!(snap.counters.framing_overhead_bytes(), 2 * 48);
        assert_eq!(snap.generator_steps, 1002);
        assert_eq!(snap.units_processed(), 2);
        assert!(snap.stage_times.has_all(&[Stage::Step, Stage::Derive, Stage::Encode, Stage::Encrypt]));
        assert!(snap.sanity_check());

        let snap = dec.telemetry();
        assert_eq!(snap.counters.units_decrypted, 2);
        assert_eq!(snap.counters.state_mismatches, 0);
        assert_eq!(snap.counters.bytes_ciphertext, 2 * (48 + 48 + 6));
        assert!(snap.stage_times.has_all(&[Stage::Decrypt, Stage::Decode, Stage::Verify]));
        assert!(snap.sanity_check());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let enc = FrameEncryptor::from_config(&PipelineConfig::default()).unwrap();
        let json = enc.telemetry().to_json().unwrap();
        assert!(json.contains("\"units_encrypted\":0"));
        assert!(json.contains("\"generator_steps\":1000"));
    }
}
