//! Randomized deviation of control values
//!
//! Hosts call [`apply_jitter`] for every control that is switched to
//! "random" mode. The result is always a whole number.
//!
//! The angular policy performs a single wraparound step rather than a full
//! modulo: an input that lands more than one turn outside `[0, 360)` is
//! only corrected once.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::random::uniform;

/// Upper bound of the percent policy.
pub const PERCENT_MAX: f64 = 100.0;

/// One full turn in degrees.
pub const FULL_TURN_DEGREES: f64 = 360.0;

/// How a jittered value is brought back into its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JitterPolicy {
    /// Rounded, unclamped.
    Plain,
    /// Rounded and clamped to `[0, 100]`.
    Percent,
    /// Rounded and wrapped once into `[0, 360)`.
    Angular,
}

/// Jitter `value` by a uniform draw in `[-spread, spread)` and apply `policy`.
pub fn apply_jitter(value: f64, spread: f64, policy: JitterPolicy, rng: &mut impl Rng) -> f64 {
    let jittered = round_half_up(value + uniform(-spread, spread, rng));

    match policy {
        JitterPolicy::Plain => jittered,
        JitterPolicy::Percent => jittered.clamp(0.0, PERCENT_MAX),
        JitterPolicy::Angular => wrap_once(jittered),
    }
}

/// Rounds `.5` toward positive infinity (`-2.5` becomes `-2`).
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn wrap_once(degrees: f64) -> f64 {
    if degrees >= FULL_TURN_DEGREES {
        degrees - FULL_TURN_DEGREES
    } else if degrees < 0.0 {
        FULL_TURN_DEGREES + degrees
    } else {
        degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(7.49), 7.0);
    }

    #[test]
    fn test_zero_spread_only_rounds() {
        let mut rng = StdRng::seed_from_u64(0);
        let plain = apply_jitter(12.4, 0.0, JitterPolicy::Plain, &mut rng);
        let percent = apply_jitter(140.0, 0.0, JitterPolicy::Percent, &mut rng);
        let angular = apply_jitter(-15.0, 0.0, JitterPolicy::Angular, &mut rng);
        assert_eq!(plain, 12.0);
        assert_eq!(percent, 100.0);
        assert_eq!(angular, 345.0);
    }

    #[test]
    fn test_plain_is_unclamped_whole_number() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let v = apply_jitter(-3.0, 50.0, JitterPolicy::Plain, &mut rng);
            assert_eq!(v, v.trunc());
            assert!((-53.0..=47.0).contains(&v));
        }
    }

    #[test]
    fn test_percent_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let v = apply_jitter(95.0, 30.0, JitterPolicy::Percent, &mut rng);
            assert!((0.0..=PERCENT_MAX).contains(&v));
        }
    }

    #[test]
    fn test_angular_wraps_single_step() {
        assert_eq!(wrap_once(370.0), 10.0);
        assert_eq!(wrap_once(360.0), 0.0);
        assert_eq!(wrap_once(-1.0), 359.0);
        assert_eq!(wrap_once(180.0), 180.0);
        // More than one turn out is only corrected once
        assert_eq!(wrap_once(800.0), 440.0);
        assert_eq!(wrap_once(-400.0), -40.0);
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&JitterPolicy::Angular).unwrap();
        assert_eq!(json, "\"angular\"");
        let back: JitterPolicy = serde_json::from_str("\"percent\"").unwrap();
        assert_eq!(back, JitterPolicy::Percent);
    }
}
