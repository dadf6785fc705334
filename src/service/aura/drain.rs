//! Drain odds and amounts.
//!
//! Success odds scale with the wealth gap between attacker and target; a shielded target cuts
//! both the odds and the amount taken.

use rand::Rng;

/// Odds of a drain against an equally wealthy, unshielded target.
pub const BASE_SUCCESS: f64 = 0.3;
pub const MAX_SUCCESS: f64 = 0.7;
pub const MIN_SUCCESS: f64 = 0.1;
pub const SHIELD_ODDS_FACTOR: f64 = 0.3;

/// Largest amount a single drain can take.
pub const MAX_DRAIN: i64 = 500;

pub const BACKFIRE_MIN: i64 = 100;
pub const BACKFIRE_MAX: i64 = 300;

/// Probability that a drain succeeds.
///
/// Every 10 000 aura the attacker holds over the target adds 0.2 to the base odds. Richer
/// attackers are capped at [`MAX_SUCCESS`], poorer ones floored at [`MIN_SUCCESS`].
pub fn success_probability(attacker_amount: i64, target_amount: i64, shielded: bool) -> f64 {
    let diff = attacker_amount.saturating_sub(target_amount);
    let raw = BASE_SUCCESS + (diff as f64 / 10_000.0) * 0.2;

    let chance = if diff > 0 {
        raw.min(MAX_SUCCESS)
    } else {
        raw.max(MIN_SUCCESS)
    };

    if shielded {
        chance * SHIELD_ODDS_FACTOR
    } else {
        chance
    }
}

/// Upper bound of a successful drain: a quarter of the target's balance, at most
/// [`MAX_DRAIN`]. Targets at or below zero yield nothing.
pub fn max_drain(target_amount: i64) -> i64 {
    target_amount.div_euclid(4).clamp(0, MAX_DRAIN)
}

/// Amount taken by a successful drain given a draw from `[max / 3, max]`.
pub fn drained_amount(drawn: i64, shielded: bool) -> i64 {
    if shielded {
        drawn.div_euclid(2)
    } else {
        drawn
    }
}

/// Whether a drain attempt with the given odds succeeds.
pub fn roll_success<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

/// Draws the amount taken from a target holding `target_amount`.
pub fn draw_amount<R: Rng + ?Sized>(rng: &mut R, target_amount: i64, shielded: bool) -> i64 {
    let max = max_drain(target_amount);
    let drawn = rng.random_range(max / 3..=max);
    drained_amount(drawn, shielded)
}

/// Draws the penalty paid by an attacker whose drain failed.
pub fn draw_backfire<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.random_range(BACKFIRE_MIN..=BACKFIRE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn equal_wealth_uses_base_odds() {
        assert!((success_probability(1000, 1000, false) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn richer_attacker_capped() {
        assert!((success_probability(10_000, 0, false) - 0.5).abs() < 1e-9);
        assert!((success_probability(1_000_000, 0, false) - MAX_SUCCESS).abs() < 1e-9);
    }

    #[test]
    fn poorer_attacker_floored() {
        assert!((success_probability(0, 5_000, false) - 0.2).abs() < 1e-9);
        assert!((success_probability(0, 1_000_000, false) - MIN_SUCCESS).abs() < 1e-9);
    }

    #[test]
    fn shield_cuts_odds() {
        let open = success_probability(5_000, 1_000, false);
        let shielded = success_probability(5_000, 1_000, true);
        assert!((shielded - open * 0.3).abs() < 1e-9);
    }

    #[test]
    fn max_drain_bounds() {
        assert_eq!(max_drain(1000), 250);
        assert_eq!(max_drain(10_000), 500);
        assert_eq!(max_drain(3), 0);
        assert_eq!(max_drain(-800), 0);
    }

    #[test]
    fn drawn_amounts_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let amount = draw_amount(&mut rng, 1000, false);
            assert!((83..=250).contains(&amount));
        }
    }

    #[test]
    fn shielded_drain_takes_at_most_half() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let amount = draw_amount(&mut rng, 2000, true);
            assert!(amount <= max_drain(2000) / 2);
        }
        assert_eq!(drained_amount(301, true), 150);
    }

    #[test]
    fn broke_target_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_amount(&mut rng, -200, false), 0);
    }

    #[test]
    fn backfire_in_range() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..500 {
            assert!((100..=300).contains(&draw_backfire(&mut rng)));
        }
    }
}
