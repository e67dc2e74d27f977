use super::*;
use crate::foundation::random::{SeededSource, SequenceSource};

#[test]
fn sampled_durations_are_in_range_with_two_decimals() {
    let range = DurationRange::default();
    let mut rng = SeededSource::new(11);
    for _ in 0..10_000 {
        let d = sample_duration(range, None, &mut rng).secs();
        assert!((0.2..=0.4).contains(&d), "{d}");
        let cents = d * 100.0;
        assert!((cents - cents.round()).abs() < 1e-9, "{d}");
    }
}

#[test]
fn range_endpoints_round_to_bounds() {
    let range = DurationRange::default();
    let mut rng = SequenceSource::new(vec![0.0, 0.99999]).unwrap();
    assert_eq!(sample_duration(range, None, &mut rng).secs(), 0.2);
    assert_eq!(sample_duration(range, None, &mut rng).secs(), 0.4);
}

#[test]
fn explicit_duration_is_returned_unchanged_without_drawing() {
    let mut rng = SequenceSource::new(vec![0.5]).unwrap();
    let explicit = AnimationDuration::new(0.7).unwrap();
    let d = sample_duration(DurationRange::default(), Some(explicit), &mut rng);
    assert_eq!(d, explicit);
    assert_eq!(rng.drawn(), 0);
}

#[test]
fn durations_must_be_positive_and_finite() {
    assert!(AnimationDuration::new(0.0).is_err());
    assert!(AnimationDuration::new(-1.0).is_err());
    assert!(AnimationDuration::new(f64::NAN).is_err());
    assert!(AnimationDuration::new(f64::INFINITY).is_err());
}

#[test]
fn millisecond_conversion_rounds() {
    let d = AnimationDuration::new(0.3).unwrap();
    assert_eq!(d.as_millis(), 300);
    assert_eq!(d.as_duration(), Duration::from_millis(300));
    assert_eq!(AnimationDuration::new(0.35).unwrap().as_millis(), 350);
    assert_eq!(AnimationDuration::new(1.0).unwrap().as_duration(), Duration::from_secs(1));
}
