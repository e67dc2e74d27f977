use super::*;

#[test]
fn defaults_match_documented_constants() {
    let cfg = WarpConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.durations, DurationRange { min: 0.2, max: 0.4 });
    assert_eq!(cfg.zones.thin, ExclusionZone { lower: 37, upper: 57 });
    assert_eq!(cfg.zones.thick, ExclusionZone { lower: 32, upper: 62 });
    assert_eq!(cfg.burst.batch, 20);
    assert_eq!(cfg.steady.delay(), Duration::from_millis(300));
    assert_eq!(cfg.steady.period(), Duration::from_millis(1));
    assert_eq!(cfg.steady.batch, 5);
    assert_eq!(cfg.steady.max_live, None);
    assert_eq!(cfg.root_selector, "#container");
}

#[test]
fn default_burst_has_eight_exact_waves() {
    let waves = BurstPhase::default().wave_durations();
    assert_eq!(waves, vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3]);
}

#[test]
fn zone_membership_is_exclusive() {
    let z = ExclusionZone { lower: 37, upper: 57 };
    assert!(!z.contains(37));
    assert!(z.contains(38));
    assert!(z.contains(56));
    assert!(!z.contains(57));
}

#[test]
fn zones_resolve_by_family() {
    let zones = ExclusionZones::default();
    assert_eq!(zones.for_family(Family::Thin), zones.thin);
    assert_eq!(zones.for_family(Family::Thick), zones.thick);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = WarpConfig::from_json_str(r#"{ "steady": { "batch": 2, "max_live": 50 } }"#).unwrap();
    assert_eq!(cfg.steady.batch, 2);
    assert_eq!(cfg.steady.max_live, Some(50));
    assert_eq!(cfg.steady.period_ms, 1);
    assert_eq!(cfg.burst, BurstPhase::default());
}

#[test]
fn json_round_trip_preserves_config() {
    let cfg = WarpConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(WarpConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = WarpConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, WarpError::Serde(_)));
}

#[test]
fn validate_rejects_inconsistent_values() {
    let mut cfg = WarpConfig::default();
    cfg.durations = DurationRange { min: 0.5, max: 0.4 };
    assert!(cfg.validate().is_err());

    let mut cfg = WarpConfig::default();
    cfg.durations.min = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = WarpConfig::default();
    cfg.zones.thick = ExclusionZone { lower: 70, upper: 60 };
    assert!(cfg.validate().is_err());

    let mut cfg = WarpConfig::default();
    cfg.zones.thin.upper = 101;
    assert!(cfg.validate().is_err());

    let mut cfg = WarpConfig::default();
    cfg.burst.speed_step = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = WarpConfig::default();
    cfg.steady.period_ms = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = WarpConfig::default();
    cfg.steady.batch = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = WarpConfig::default();
    cfg.root_selector = "  ".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn oversized_bursts_are_rejected_before_spawning() {
    assert_eq!(BurstPhase::default().wave_count(), 8);

    let err = WarpConfig::from_json_str(r#"{"burst":{"start_speed":1e12,"speed_step":0.01}}"#)
        .unwrap_err();
    assert!(matches!(err, WarpError::Validation(_)));
    assert!(err.to_string().contains("waves"));

    let mut cfg = WarpConfig::default();
    cfg.burst.start_speed = 100.2;
    cfg.burst.speed_step = 0.01;
    assert_eq!(cfg.burst.wave_count(), BurstPhase::MAX_WAVES);
    cfg.validate().unwrap();
    cfg.burst.start_speed = 100.21;
    assert!(cfg.validate().is_err());
}

#[test]
fn wave_count_matches_generated_waves() {
    let cases = [(1.0, 0.1, 0.2), (1.0, 0.3, 0.2), (0.5, 0.1, 0.5), (2.0, 0.25, 0.0)];
    for (start, step, stop) in cases {
        let burst = BurstPhase {
            start_speed: start,
            speed_step: step,
            stop_speed: stop,
            batch: 1,
        };
        assert_eq!(burst.wave_count(), burst.wave_durations().len() as u64);
    }
}

#[test]
fn durations_below_one_hundredth_are_rejected() {
    let mut cfg = WarpConfig::default();
    cfg.durations = DurationRange {
        min: 0.001,
        max: 0.004,
    };
    assert!(matches!(cfg.validate(), Err(WarpError::Validation(_))));

    cfg.durations = DurationRange {
        min: 0.01,
        max: 0.02,
    };
    cfg.validate().unwrap();
}

#[test]
fn missing_file_is_reported() {
    let err = WarpConfig::from_json_path(Path::new("target/does-not-exist/warp.json")).unwrap_err();
    assert!(err.to_string().contains("does-not-exist"));
}
