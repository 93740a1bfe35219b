use chrono::NaiveTime;
use crate::config::TariffParameters;

/// Visual category of a price point in the price chart
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PointCategory {
    /// Price above the alert threshold
    Alert,
    /// Price at or below zero, i.e. free or paid to consume
    FreeOrPaid,
    /// Price at or below the flat tariff's off-peak rate
    BelowFlatRate,
    Normal,
}

/// Classifies a price, categories are tried in declaration order and the first match wins
///
/// # Arguments
///
/// * 'price' - price inc VAT in pence per kWh
/// * 'params' - tariff parameters holding the alert threshold and flat off-peak rate
pub fn classify(price: f64, params: &TariffParameters) -> PointCategory {
    match price {
        p if p > params.alert_threshold => PointCategory::Alert,
        p if p <= 0.0 => PointCategory::FreeOrPaid,
        p if p <= params.flat_off_peak_rate => PointCategory::BelowFlatRate,
        _ => PointCategory::Normal,
    }
}

/// Returns true if the time of day is within the flat tariff's off-peak window, start inclusive
///
/// # Arguments
///
/// * 'time' - local time of day
/// * 'params' - tariff parameters holding the off-peak window
pub fn is_off_peak(time: NaiveTime, params: &TariffParameters) -> bool {
    params.off_peak_start <= time && time < params.off_peak_end
}

/// Returns the flat tariff's unit rate applicable at the given time of day
///
/// # Arguments
///
/// * 'time' - local time of day
/// * 'params' - tariff parameters
pub fn flat_rate_at(time: NaiveTime, params: &TariffParameters) -> f64 {
    if is_off_peak(time, params) {
        params.flat_off_peak_rate
    } else {
        params.flat_peak_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn off_peak_window_bounds() {
        let params = TariffParameters::default();

        assert!(!is_off_peak(hm(0, 0), &params));
        assert!(is_off_peak(hm(0, 30), &params));
        assert!(is_off_peak(hm(5, 0), &params));
        assert!(!is_off_peak(hm(5, 30), &params));
        assert!(!is_off_peak(hm(17, 0), &params));
    }

    #[test]
    fn flat_rate_follows_window() {
        let params = TariffParameters::default();

        assert_eq!(flat_rate_at(hm(1, 0), &params), 9.0);
        assert_eq!(flat_rate_at(hm(12, 0), &params), 30.92);
    }

    #[test]
    fn categories_in_priority_order() {
        let params = TariffParameters::default();

        assert_eq!(classify(27.81, &params), PointCategory::Alert);
        assert_eq!(classify(27.8, &params), PointCategory::Normal);
        assert_eq!(classify(0.0, &params), PointCategory::FreeOrPaid);
        assert_eq!(classify(-4.2, &params), PointCategory::FreeOrPaid);
        assert_eq!(classify(9.0, &params), PointCategory::BelowFlatRate);
        assert_eq!(classify(9.01, &params), PointCategory::Normal);
    }

    #[test]
    fn alert_wins_over_other_categories() {
        let params = TariffParameters { alert_threshold: -10.0, ..TariffParameters::default() };

        assert_eq!(classify(-5.0, &params), PointCategory::Alert);
    }
}
