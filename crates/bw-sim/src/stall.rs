//! First-order dynamic-stall separation state.

/// Below this relative speed the stall time constant is undefined and the
/// separation state is held.
pub const MIN_RELATIVE_SPEED: f64 = 1e-6;

/// Advance the separation function `fs` one step toward `f_stat`.
///
/// The time constant is `4 c / |V_rel|`, i.e. four chord lengths of travel.
pub fn update_separation(fs_prev: f64, f_stat: f64, chord: f64, vrel: f64, dt: f64) -> f64 {
    if vrel < MIN_RELATIVE_SPEED || chord <= 0.0 {
        return fs_prev;
    }
    let tau = 4.0 * chord / vrel;
    f_stat + (fs_prev - f_stat) * (-dt / tau).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn relaxes_toward_static_value() {
        let mut fs = 0.0;
        for _ in 0..500 {
            fs = update_separation(fs, 0.8, 2.0, 50.0, 0.15);
        }
        assert!((fs - 0.8).abs() < 1e-12);
    }

    #[test]
    fn one_time_constant_covers_63_percent() {
        let fs = update_separation(0.0, 1.0, 1.0, 4.0, 1.0);
        assert!((fs - (1.0 - (-1.0f64).exp())).abs() < 1e-15);
    }

    #[test]
    fn holds_at_zero_speed() {
        assert_eq!(update_separation(0.3, 1.0, 1.0, 0.0, 0.1), 0.3);
    }

    proptest! {
        #[test]
        fn stays_between_previous_and_target(
            prev in 0.0f64..1.0, target in 0.0f64..1.0, vrel in 0.1f64..100.0
        ) {
            let fs = update_separation(prev, target, 3.0, vrel, 0.15);
            prop_assert!(fs >= prev.min(target) - 1e-12);
            prop_assert!(fs <= prev.max(target) + 1e-12);
        }
    }
}
