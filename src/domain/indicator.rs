//! RSI-14 over a close-price series.
//!
//! Uses Wilder smoothing: the first average gain/loss is a simple mean
//! over the lookback window, and every later delta is folded in at a
//! `1/period` weight. The series must be ordered oldest first.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::{PriceSample, Symbol};

/// Lookback window for the oscillator.
pub const RSI_PERIOD: usize = 14;

/// Midpoint returned when the series is too short to define the
/// indicator, so downstream threshold comparisons stay well-defined.
pub fn neutral_rsi() -> Decimal {
    Decimal::from(50)
}

/// Last close of the series, or the zero sentinel for an empty series.
/// Callers treat zero as "no data", never as a real quote.
pub fn latest_price(closes: &[Decimal]) -> Decimal {
    closes.last().copied().unwrap_or(Decimal::ZERO)
}

/// Wilder-smoothed RSI over `closes`.
///
/// Defined once at least `period + 1` closes exist; shorter series yield
/// the neutral midpoint. A flat series has no gains and no losses and is
/// also reported as neutral.
pub fn rsi(closes: &[Decimal], period: usize) -> Decimal {
    if period == 0 || closes.len() < period + 1 {
        return neutral_rsi();
    }

    let p = Decimal::from(period as u64);
    let smooth = p - Decimal::ONE;

    let mut avg_gain = Decimal::ZERO;
    let mut avg_loss = Decimal::ZERO;
    for pair in closes.windows(2).take(period) {
        let delta = pair[1] - pair[0];
        if delta > Decimal::ZERO {
            avg_gain += delta;
        } else {
            avg_loss -= delta;
        }
    }
    avg_gain /= p;
    avg_loss /= p;

    for pair in closes.windows(2).skip(period) {
        let delta = pair[1] - pair[0];
        let (gain, loss) = if delta > Decimal::ZERO {
            (delta, Decimal::ZERO)
        } else {
            (Decimal::ZERO, -delta)
        };
        avg_gain = (avg_gain * smooth + gain) / p;
        avg_loss = (avg_loss * smooth + loss) / p;
    }

    let total = avg_gain + avg_loss;
    if total.is_zero() {
        return neutral_rsi();
    }
    Decimal::ONE_HUNDRED * avg_gain / total
}

/// Turn one fetched close series into the per-tick snapshot.
pub fn evaluate(symbol: Symbol, closes: &[Decimal], sampled_at: NaiveDateTime) -> PriceSample {
    PriceSample {
        symbol,
        price: latest_price(closes),
        rsi: rsi(closes, RSI_PERIOD),
        sampled_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn series(values: &[f64]) -> Vec<Decimal> {
        values
            .iter()
            .map(|v| Decimal::try_from(*v).unwrap())
            .collect()
    }

    #[test]
    fn empty_series_yields_sentinel_price_and_neutral_rsi() {
        assert_eq!(latest_price(&[]), Decimal::ZERO);
        assert_eq!(rsi(&[], RSI_PERIOD), dec!(50));
    }

    #[test]
    fn short_series_is_neutral() {
        let closes = series(&[20.0, 19.0, 18.0]);
        assert_eq!(rsi(&closes, RSI_PERIOD), dec!(50));
        assert_eq!(latest_price(&closes), dec!(18.0));
    }

    #[test]
    fn monotonic_rise_saturates_at_one_hundred() {
        let closes: Vec<Decimal> = (0..=14).map(|i| Decimal::from(10 + i)).collect();
        assert_eq!(rsi(&closes, RSI_PERIOD), dec!(100));
    }

    #[test]
    fn monotonic_fall_saturates_at_zero() {
        let closes: Vec<Decimal> = (0..=14).map(|i| Decimal::from(50 - i)).collect();
        assert_eq!(rsi(&closes, RSI_PERIOD), Decimal::ZERO);
    }

    #[test]
    fn balanced_gains_and_losses_sit_at_the_midpoint() {
        // 14 deltas alternating +1/-1: average gain equals average loss.
        let mut closes = vec![dec!(20)];
        for i in 0..14 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 {
                last + Decimal::ONE
            } else {
                last - Decimal::ONE
            });
        }
        assert_eq!(rsi(&closes, RSI_PERIOD), dec!(50));
    }

    #[test]
    fn known_gain_loss_ratio() {
        // Ten deltas with one +3 and one -7, the rest flat, over a
        // 10-period window: RSI = 100 * 3 / (3 + 7) = 30 exactly.
        let mut closes = vec![dec!(20), dec!(23), dec!(16)];
        closes.resize(11, dec!(16));
        assert_eq!(rsi(&closes, 10), dec!(30));
    }

    #[test]
    fn wilder_smoothing_carries_past_the_window() {
        // Flat through the first window, then one gain: the smoothed
        // average loss stays zero, so the oscillator pins at 100.
        let mut closes = vec![dec!(25); 15];
        closes.push(dec!(26));
        assert_eq!(rsi(&closes, RSI_PERIOD), dec!(100));
    }

    #[test]
    fn flat_series_is_neutral_not_a_division_error() {
        let closes = vec![dec!(25); 20];
        assert_eq!(rsi(&closes, RSI_PERIOD), dec!(50));
    }
}
