use super::*;

#[test]
fn matches_atan_of_slope_off_the_center_line() {
    for left in 0..=100u32 {
        if left == 50 {
            continue;
        }
        for top in 0..=100u32 {
            let slope = (f64::from(top) - 50.0) / (f64::from(left) - 50.0);
            let r = corrective_rotation(Position { left, top });
            assert_eq!(r, slope.atan());
            if slope == 0.0 {
                assert_eq!(r, 0.0);
            } else {
                assert_eq!(r.signum(), slope.signum(), "left={left} top={top}");
            }
        }
    }
}

#[test]
fn vertical_center_line_has_explicit_values() {
    assert_eq!(corrective_rotation(Position { left: 50, top: 50 }), 0.0);
    assert_eq!(corrective_rotation(Position { left: 50, top: 80 }), FRAC_PI_2);
    assert_eq!(corrective_rotation(Position { left: 50, top: 10 }), -FRAC_PI_2);
}

#[test]
fn rotation_is_always_finite() {
    for left in 0..=100u32 {
        for top in 0..=100u32 {
            let r = corrective_rotation(Position { left, top });
            assert!(r.is_finite());
            assert!(r.abs() <= FRAC_PI_2);
        }
    }
}
