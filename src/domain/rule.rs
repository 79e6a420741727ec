//! The automatic fire/no-fire decision.
//!
//! Pure calendar-and-threshold logic; the manual trigger path bypasses
//! all of it (see [`AlertEngine::fire_manual`](crate::service::AlertEngine::fire_manual)).

use chrono::Weekday;
use rust_decimal::Decimal;

use super::{PriceSample, WatchedInstrument};

/// Default market weekend on which automatic alerts are withheld.
pub const DEFAULT_SUPPRESSED_DAYS: [Weekday; 2] = [Weekday::Fri, Weekday::Sat];

pub fn is_suppressed_day(day: Weekday, suppressed: &[Weekday]) -> bool {
    suppressed.contains(&day)
}

/// Automatic trigger condition.
///
/// Both numeric comparisons are inclusive: a price or RSI exactly at its
/// threshold fires. No cooldown is applied; as long as the conditions
/// hold, the same symbol fires on every tick.
pub fn should_fire(
    sample: &PriceSample,
    entry: &WatchedInstrument,
    rsi_threshold: Decimal,
    suppressed_today: bool,
) -> bool {
    sample.price <= entry.threshold
        && sample.rsi <= rsi_threshold
        && !entry.muted
        && !suppressed_today
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Symbol;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn sample(price: Decimal, rsi: Decimal) -> PriceSample {
        PriceSample {
            symbol: Symbol::new("TEST.SR").unwrap(),
            price,
            rsi,
            sampled_at: NaiveDateTime::default(),
        }
    }

    fn entry(threshold: Decimal, muted: bool) -> WatchedInstrument {
        WatchedInstrument {
            symbol: Symbol::new("TEST.SR").unwrap(),
            threshold,
            muted,
            last_alert_at: None,
        }
    }

    #[test]
    fn fires_when_all_conditions_hold() {
        let s = sample(dec!(19.50), dec!(25));
        assert!(should_fire(&s, &entry(dec!(20.00), false), dec!(30), false));
    }

    #[test]
    fn flipping_any_single_condition_blocks_the_fire() {
        let rsi_threshold = dec!(30);

        // Price above threshold.
        let s = sample(dec!(20.01), dec!(25));
        assert!(!should_fire(&s, &entry(dec!(20.00), false), rsi_threshold, false));

        // RSI above threshold.
        let s = sample(dec!(19.50), dec!(30.1));
        assert!(!should_fire(&s, &entry(dec!(20.00), false), rsi_threshold, false));

        // Muted.
        let s = sample(dec!(19.50), dec!(25));
        assert!(!should_fire(&s, &entry(dec!(20.00), true), rsi_threshold, false));

        // Suppressed day.
        let s = sample(dec!(19.50), dec!(25));
        assert!(!should_fire(&s, &entry(dec!(20.00), false), rsi_threshold, true));
    }

    #[test]
    fn at_threshold_values_still_fire() {
        let s = sample(dec!(20.00), dec!(30));
        assert!(should_fire(&s, &entry(dec!(20.00), false), dec!(30), false));
    }

    #[test]
    fn default_suppressed_days_are_the_market_weekend() {
        assert!(is_suppressed_day(Weekday::Fri, &DEFAULT_SUPPRESSED_DAYS));
        assert!(is_suppressed_day(Weekday::Sat, &DEFAULT_SUPPRESSED_DAYS));
        assert!(!is_suppressed_day(Weekday::Sun, &DEFAULT_SUPPRESSED_DAYS));
        assert!(!is_suppressed_day(Weekday::Mon, &DEFAULT_SUPPRESSED_DAYS));
    }
}
