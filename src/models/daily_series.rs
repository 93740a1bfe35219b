use std::fmt;
use std::fmt::Formatter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit price for one half-hour interval, prices are in pence per kWh
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PricePoint {
    pub valid_from: DateTime<Utc>,
    #[serde(default)]
    pub valid_to: Option<DateTime<Utc>>,
    pub value_exc_vat: f64,
    pub value_inc_vat: f64,
}

impl fmt::Display for PricePoint {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} -> exc VAT {:>6.2}, inc VAT {:>6.2}",
               self.valid_from.format("%Y-%m-%d %H:%M"), self.value_exc_vat, self.value_inc_vat)
    }
}

/// One day's worth of price points, always sorted ascending on `valid_from`
#[derive(Clone, Debug, Default)]
pub struct DailySeries {
    points: Vec<PricePoint>,
}

impl DailySeries {
    /// Returns a new series with the given points sorted on interval start.
    /// The rates API delivers newest first, so the order of the input is not trusted.
    ///
    /// # Arguments
    ///
    /// * 'points' - price points in any order
    pub fn new(mut points: Vec<PricePoint>) -> DailySeries {
        points.sort_by_key(|p| p.valid_from);
        DailySeries { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
