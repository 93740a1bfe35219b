use serde::Deserialize;
use crate::models::daily_series::PricePoint;

/// One page of the standard unit rates endpoint
#[derive(Deserialize, Debug)]
pub struct UnitRates {
    pub count: Option<usize>,
    pub next: Option<String>,
    pub results: Vec<PricePoint>,
}
