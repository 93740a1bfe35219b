use std::fmt;
use std::fmt::Formatter;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use crate::config::TariffParameters;
use crate::errors::EngineError;
use crate::models::daily_series::DailySeries;

/// Number of half-hour slots in one hour
const SLOTS_PER_HOUR: f64 = 2.0;

/// The two competing tariffs
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tariff {
    Flat,
    Dynamic,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Tariff {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Tariff::Flat    => write!(f, "flat"),
            Tariff::Dynamic => write!(f, "agile"),
        }
    }
}

/// Cheapest window for one session duration and how it compares to the flat tariff
#[derive(Clone, Debug, PartialEq)]
pub struct WindowResult {
    pub hours: f64,
    pub start_time: DateTime<Utc>,
    pub dynamic_cost: f64,
    pub flat_cost: f64,
    pub winner: Tariff,
    pub price_diff: f64,
    pub effective_rate: f64,
}

impl WindowResult {
    /// Returns the result in its display form, i.e. rounded to one decimal and with
    /// the start time split into a local date and time of day
    ///
    /// # Arguments
    ///
    /// * 'tz' - the civil timezone to present the start time in
    pub fn to_row(&self, tz: &Tz) -> TableRow {
        let local = self.start_time.with_timezone(tz);
        TableRow {
            hours: round_one(self.hours),
            date: local.date_naive(),
            time: local.time(),
            flat_cost: round_one(self.flat_cost),
            dynamic_cost: round_one(self.dynamic_cost),
            winner: self.winner,
            price_diff: round_one(self.price_diff),
            effective_rate: round_one(self.effective_rate),
        }
    }
}

/// Display form of a WindowResult
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub hours: f64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub flat_cost: f64,
    pub dynamic_cost: f64,
    pub winner: Tariff,
    pub price_diff: f64,
    pub effective_rate: f64,
}

impl TableRow {
    pub const HEADERS: [&'static str; 8] =
        ["hours", "date", "time", "flat_price", "agile_price", "winner", "price_diff", "rate"];

    /// Returns the row as cell texts in the same order as HEADERS
    pub fn cells(&self) -> [String; 8] {
        [
            format!("{:.1}", self.hours),
            self.date.format("%Y-%m-%d").to_string(),
            self.time.format("%H:%M:%S").to_string(),
            format!("{:.1}", self.flat_cost),
            format!("{:.1}", self.dynamic_cost),
            self.winner.to_string(),
            format!("{:.1}", self.price_diff),
            format!("{:.1}", self.effective_rate),
        ]
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for TableRow {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:>3.1}h from {} {} -> flat {:>6.1}, agile {:>6.1}, winner {:<5} by {:>5.1}, rate {:>5.1}",
               self.hours, self.date, self.time.format("%H:%M"), self.flat_cost, self.dynamic_cost,
               self.winner, self.price_diff, self.effective_rate)
    }
}

/// Finds, for every configured session duration, the cheapest contiguous window of the day
/// on the dynamic tariff and compares its cost against the flat tariff.
///
/// A duration is given as a slot offset n, the window being the starting slot plus the
/// next n half-hour slots.
///
/// # Arguments
///
/// * 'series' - the day's prices
/// * 'params' - tariff and consumption parameters
pub fn compare_tariffs(series: &DailySeries, params: &TariffParameters) -> Result<Vec<WindowResult>, EngineError> {
    if series.is_empty() {
        return Err(EngineError::InsufficientData);
    }
    if !(params.consumption_per_half_hour > 0.0) {
        return Err(EngineError::InvalidParameters(
            format!("consumption per half hour must be positive, got {}", params.consumption_per_half_hour)));
    }

    let costs = series.points()
        .iter()
        .map(|p| p.value_exc_vat * params.consumption_per_half_hour)
        .collect::<Vec<f64>>();

    let results = params.duration_slots
        .iter()
        .map(|&n| {
            let hours = slot_hours(n);
            let sums = window_sums(&costs, n);
            let (start, min_sum) = cheapest_window(&sums, n);

            let dynamic_cost = min_sum + params.dynamic_standing_charge;
            let flat_cost = flat_cost(hours, params);
            let (winner, winning_cost) = if flat_cost < dynamic_cost {
                (Tariff::Flat, flat_cost)
            } else {
                (Tariff::Dynamic, dynamic_cost)
            };

            WindowResult {
                hours,
                start_time: series.points()[start].valid_from,
                dynamic_cost,
                flat_cost,
                winner,
                price_diff: (flat_cost - dynamic_cost).abs(),
                effective_rate: winning_cost / (hours * SLOTS_PER_HOUR * params.consumption_per_half_hour),
            }
        })
        .collect();

    Ok(results)
}

/// Session length in hours for a window of the current slot plus n following slots
pub fn slot_hours(n: usize) -> f64 {
    (n + 1) as f64 / SLOTS_PER_HOUR
}

/// Cost of a session of the given length on the flat tariff, standing charge included
///
/// # Arguments
///
/// * 'hours' - session length
/// * 'params' - tariff and consumption parameters
pub fn flat_cost(hours: f64, params: &TariffParameters) -> f64 {
    params.flat_off_peak_rate * hours * SLOTS_PER_HOUR * params.consumption_per_half_hour
        + params.flat_standing_charge
}

/// Sums, for every start slot i, the costs of slots i..=i+n. Windows reaching past the
/// end of the series only sum the slots that exist.
///
/// # Arguments
///
/// * 'costs' - per slot costs
/// * 'n' - number of slots following the start slot
pub fn window_sums(costs: &[f64], n: usize) -> Vec<f64> {
    (0..costs.len())
        .map(|i| {
            let end = (i + n + 1).min(costs.len());
            costs[i..end].iter().sum::<f64>()
        })
        .collect()
}

/// Returns the start index and sum of the cheapest window, earliest start wins on equal sums.
///
/// Only windows that fit entirely inside the series compete. If the series is too short
/// for any full window, the truncated windows are used instead.
///
/// # Arguments
///
/// * 'sums' - window sums as given by window_sums, must not be empty
/// * 'n' - number of slots following the start slot
fn cheapest_window(sums: &[f64], n: usize) -> (usize, f64) {
    let candidates = if sums.len() > n { sums.len() - n } else { sums.len() };

    let mut best = (0, sums[0]);
    for (i, &sum) in sums.iter().enumerate().take(candidates).skip(1) {
        if sum < best.1 {
            best = (i, sum);
        }
    }

    best
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{TimeDelta, TimeZone};
    use crate::models::daily_series::PricePoint;
    use super::*;

    fn series(prices: &[f64]) -> DailySeries {
        let start = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint {
                valid_from: start + TimeDelta::minutes(30 * i as i64),
                valid_to: None,
                value_exc_vat: p,
                value_inc_vat: p * 1.05,
            })
            .collect();
        DailySeries::new(points)
    }

    fn no_standing_charges() -> TariffParameters {
        TariffParameters {
            dynamic_standing_charge: 0.0,
            flat_standing_charge: 0.0,
            ..TariffParameters::default()
        }
    }

    #[test]
    fn one_result_per_duration() {
        let result = compare_tariffs(&series(&[20.0; 48]), &TariffParameters::default()).unwrap();

        assert_eq!(result.len(), 7);
        let hours = result.iter().map(|r| r.hours).collect::<Vec<f64>>();
        assert_eq!(hours, vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0]);
    }

    #[test]
    fn constant_prices_report_earliest_slot() {
        let params = TariffParameters { duration_slots: vec![1], ..no_standing_charges() };

        let result = compare_tariffs(&series(&[20.0; 48]), &params).unwrap();

        assert_abs_diff_eq!(result[0].dynamic_cost, 88.0, epsilon = 1e-9);
        assert_eq!(result[0].start_time, Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn equal_windows_prefer_earlier_start() {
        let params = TariffParameters { duration_slots: vec![1], ..no_standing_charges() };

        let result = compare_tariffs(&series(&[5.0, 1.0, 1.0, 5.0, 1.0, 1.0, 5.0]), &params).unwrap();

        assert_eq!(result[0].start_time, Utc.with_ymd_and_hms(2025, 1, 15, 0, 30, 0).unwrap());
    }

    #[test]
    fn dynamic_cost_is_minimal() {
        let prices = [
            24.1, 22.8, 21.0, 19.9, 18.2, 17.5, 16.0, 15.2, 15.9, 17.3, 19.8, 23.4,
            26.0, 25.1, 22.2, 20.7, 18.8, 17.1, 14.3, 12.9, 13.8, 16.6, 21.5, 30.2,
            35.7, 38.1, 33.0, 27.4, 24.9, 22.0, 19.3, 17.8, 16.2, 15.0, 14.1, 13.6,
            13.9, 15.5, 18.0, 21.3, 25.8, 29.9, 31.2, 28.4, 24.6, 21.7, 19.1, 17.0,
        ];
        let params = TariffParameters::default();
        let costs = prices.iter().map(|p| p * params.consumption_per_half_hour).collect::<Vec<f64>>();

        let result = compare_tariffs(&series(&prices), &params).unwrap();

        for (r, &n) in result.iter().zip(&params.duration_slots) {
            let sums = window_sums(&costs, n);
            for sum in &sums[..prices.len() - n] {
                assert!(r.dynamic_cost <= sum + params.dynamic_standing_charge + 1e-9);
            }
        }
        assert_eq!(result[0].start_time, Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap());
    }

    #[test]
    fn window_sums_truncate_at_end() {
        assert_eq!(window_sums(&[1.0, 2.0, 3.0], 2), vec![6.0, 5.0, 3.0]);
        assert_eq!(window_sums(&[1.0, 2.0, 3.0], 7), vec![6.0, 5.0, 3.0]);
        assert!(window_sums(&[], 3).is_empty());
    }

    #[test]
    fn truncated_tail_does_not_compete_with_full_windows() {
        let params = TariffParameters { duration_slots: vec![1], ..no_standing_charges() };

        let result = compare_tariffs(&series(&[10.0, 10.0, 10.0, 1.0]), &params).unwrap();

        assert_abs_diff_eq!(result[0].dynamic_cost, 11.0 * 2.2, epsilon = 1e-9);
        assert_eq!(result[0].start_time, Utc.with_ymd_and_hms(2025, 1, 15, 1, 0, 0).unwrap());
    }

    #[test]
    fn single_slot_series_uses_truncated_window() {
        let params = no_standing_charges();

        let result = compare_tariffs(&series(&[12.5]), &params).unwrap();

        assert_eq!(result.len(), 7);
        for r in result {
            assert_abs_diff_eq!(r.dynamic_cost, 12.5 * 2.2, epsilon = 1e-9);
            assert_eq!(r.start_time, Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap());
        }
    }

    #[test]
    fn empty_series_is_refused() {
        let result = compare_tariffs(&DailySeries::default(), &TariffParameters::default());

        assert_eq!(result, Err(EngineError::InsufficientData));
    }

    #[test]
    fn zero_consumption_is_refused() {
        let params = TariffParameters { consumption_per_half_hour: 0.0, ..TariffParameters::default() };

        let result = compare_tariffs(&series(&[10.0]), &params);

        assert!(matches!(result, Err(EngineError::InvalidParameters(_))));
    }

    #[test]
    fn flat_cost_for_one_hour() {
        let params = TariffParameters { flat_off_peak_rate: 9.0, ..no_standing_charges() };

        assert_abs_diff_eq!(flat_cost(1.0, &params), 39.6, epsilon = 1e-9);
    }

    #[test]
    fn winner_and_difference_follow_costs() {
        let params = TariffParameters::default();
        let mut prices = [25.0; 48];
        prices[4] = -2.0;
        prices[5] = -1.5;

        let result = compare_tariffs(&series(&prices), &params).unwrap();

        for r in &result {
            let expected = if r.flat_cost < r.dynamic_cost { Tariff::Flat } else { Tariff::Dynamic };
            assert_eq!(r.winner, expected);
            assert_abs_diff_eq!(r.price_diff, (r.flat_cost - r.dynamic_cost).abs(), epsilon = 1e-9);
            let winning = r.flat_cost.min(r.dynamic_cost);
            assert_abs_diff_eq!(r.effective_rate, winning / (r.hours * 2.0 * 2.2), epsilon = 1e-9);
        }
        assert_eq!(result[0].winner, Tariff::Dynamic);
        assert_eq!(result[6].winner, Tariff::Flat);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let prices = [14.0, 9.5, 3.2, 7.7, 22.1, 30.4, 18.0, 11.1, 6.6];
        let params = TariffParameters::default();

        let first = compare_tariffs(&series(&prices), &params).unwrap();
        let second = compare_tariffs(&series(&prices), &params).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn row_is_rounded_and_local() {
        let result = WindowResult {
            hours: 1.5,
            start_time: Utc.with_ymd_and_hms(2025, 6, 30, 23, 30, 0).unwrap(),
            dynamic_cost: 101.26,
            flat_cost: 101.14,
            winner: Tariff::Flat,
            price_diff: 0.12,
            effective_rate: 15.3242,
        };

        let row = result.to_row(&chrono_tz::Europe::London);

        assert_eq!(row.date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(row.time, NaiveTime::from_hms_opt(0, 30, 0).unwrap());
        assert_eq!(row.dynamic_cost, 101.3);
        assert_eq!(row.price_diff, 0.1);
        assert_eq!(row.effective_rate, 15.3);
        assert_eq!(row.cells()[5], "flat");
    }
}
