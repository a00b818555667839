#[cfg(test)]
mod tests {
    use hyperframe_core::pipeline::{ConfigError, MismatchPolicy, PipelineConfig};
    use hyperframe_core::record::RecordLimits;

    #[test]
    fn test_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.seed, 0.1);
        assert_eq!(cfg.dt, 0.01);
        assert_eq!(cfg.warmup, 1000);
        assert_eq!(cfg.tolerance, 1e-6);
        assert_eq!(cfg.mismatch_policy, MismatchPolicy::Warn);
        assert_eq!(cfg.limits, RecordLimits { max_width: 8192, max_height: 8192, max_audio_samples: 1 << 20 });
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = PipelineConfig {
            seed: -0.25,
            warmup: 42,
            mismatch_policy: MismatchPolicy::Reject,
            ..PipelineConfig::default()
        };
        let json = cfg.to_json().unwrap();
        assert!(json.contains("\"reject\""));
        assert_eq!(PipelineConfig::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = PipelineConfig::from_json_str(r#"{ "seed": 0.3, "mismatch_policy": "reject" }"#).unwrap();
        assert_eq!(cfg.seed, 0.3);
        assert_eq!(cfg.mismatch_policy, MismatchPolicy::Reject);
        assert_eq!(cfg.warmup, 1000);
        assert_eq!(cfg.limits, RecordLimits::default());
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        assert_eq!(
            PipelineConfig::from_json_str(r#"{ "dt": -0.01 }"#).unwrap_err(),
            ConfigError::InvalidStep(-0.01)
        );
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{ "mismatch_policy": "ignore" }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(PipelineConfig::from_json_str("not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_each_field() {
        let base = PipelineConfig::default();

        let cfg = PipelineConfig { seed: f64::NAN, ..base.clone() };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidSeed(_))));

        let cfg = PipelineConfig { dt: 0.0, ..base.clone() };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidStep(0.0)));

        let cfg = PipelineConfig { dt: f64::INFINITY, ..base.clone() };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidStep(_))));

        let cfg = PipelineConfig { tolerance: -1.0, ..base.clone() };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidTolerance(-1.0)));

        let cfg = PipelineConfig { tolerance: 0.0, ..base.clone() };
        assert!(cfg.validate().is_ok());

        let limits = RecordLimits { max_height: 0, ..RecordLimits::default() };
        let cfg = PipelineConfig { limits, ..base };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroLimit("max_height")));
    }
}
