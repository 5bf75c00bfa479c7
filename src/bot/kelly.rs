//! Fractional Kelly sizing for binary prediction-market tokens.
//!
//! A token bought at `price` pays 1 if it resolves in our favour, so the net
//! odds are `b = 1/price - 1` and the full Kelly fraction is
//! `f* = (b·p - (1 - p)) / b`. Loly only ever stakes a fraction of `f*`.

/// Fraction of bankroll to stake on a token, already scaled by
/// `kelly_fraction`. Zero when there is no edge or the price is degenerate.
pub fn kelly_stake(win_prob: f64, market_price: f64, kelly_fraction: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&win_prob), "win_prob out of range");
    debug_assert!(
        (0.0..=1.0).contains(&kelly_fraction),
        "kelly_fraction out of range"
    );

    if market_price <= 0.0 || market_price >= 1.0 {
        return 0.0;
    }

    let odds = 1.0 / market_price - 1.0;
    let full = (odds * win_prob - (1.0 - win_prob)) / odds;
    if full <= 0.0 {
        return 0.0;
    }
    (full * kelly_fraction).clamp(0.0, 1.0)
}

/// Expected return per dollar: `win_prob / price - 1`.
pub fn edge(win_prob: f64, market_price: f64) -> f64 {
    if market_price <= 0.0 {
        return 0.0;
    }
    win_prob / market_price - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fair_price_stakes_nothing() {
        assert_relative_eq!(kelly_stake(0.7, 0.7, 1.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(edge(0.7, 0.7), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn legendary_pick_against_cheap_token() {
        // p = 0.9 at 0.6: b = 2/3, f* = (0.6 - 0.1) / (2/3) = 0.75
        assert_relative_eq!(kelly_stake(0.9, 0.6, 1.0), 0.75, epsilon = 1e-9);
        assert_relative_eq!(kelly_stake(0.9, 0.6, 0.25), 0.1875, epsilon = 1e-9);
        assert_relative_eq!(edge(0.9, 0.6), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn overpriced_token_stakes_nothing() {
        assert_eq!(kelly_stake(0.55, 0.8, 1.0), 0.0);
        assert!(edge(0.55, 0.8) < 0.0);
    }

    #[test]
    fn degenerate_prices() {
        assert_eq!(kelly_stake(0.8, 0.0, 1.0), 0.0);
        assert_eq!(kelly_stake(0.8, 1.0, 1.0), 0.0);
        assert_eq!(edge(0.8, 0.0), 0.0);
        assert!(kelly_stake(0.99, 0.01, 1.0) <= 1.0);
    }
}
