pub mod errors;

use std::time::Duration;
use chrono::NaiveDate;
use log::{debug, info, warn};
use reqwest::blocking::{Client, RequestBuilder};
use crate::config::OctopusParameters;
use crate::manager_octopus::errors::FetchError;
use crate::models::daily_series::{DailySeries, PricePoint};
use crate::models::octopus_rates::UnitRates;
use crate::pipeline::RateSource;

/// Upper bound on followed pagination links, one day fits in a single page
const MAX_PAGES: usize = 10;

pub struct Octopus {
    client: Client,
    base_url: String,
    product_code: String,
    tariff_code: String,
}

impl Octopus {
    /// Returns a new instance of the Octopus struct
    ///
    /// # Arguments
    ///
    /// * 'params' - product and tariff to retrieve unit rates for
    pub fn new(params: &OctopusParameters) -> Result<Octopus, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Octopus {
            client,
            base_url: params.base_url.trim_end_matches('/').to_string(),
            product_code: params.product_code.clone(),
            tariff_code: params.tariff_code.clone(),
        })
    }

    /// Returns the url to the standard unit rates endpoint for the configured tariff
    pub fn rates_url(&self) -> String {
        format!("{}/products/{}/electricity-tariffs/{}/standard-unit-rates/",
                self.base_url, self.product_code, self.tariff_code)
    }

    /// Retrieves the half-hourly unit rates for the given UTC day
    ///
    /// # Arguments
    ///
    /// * 'day' - the day to retrieve rates for
    pub fn get_rates(&self, day: NaiveDate) -> Result<DailySeries, FetchError> {
        let (period_from, period_to) = period(day);
        info!("Fetching rates for {}", day);

        let first = self.get_page(
            self.client
                .get(self.rates_url())
                .query(&[("period_from", period_from.as_str()), ("period_to", period_to.as_str())])
        )?;
        let points = collect_pages(first, day, |next| self.get_page(self.client.get(next)))?;
        info!("Fetched {} rate entries", points.len());

        let series = DailySeries::new(points);
        for p in series.points() {
            debug!("{}", p);
        }

        Ok(series)
    }

    /// Sends a request for one page of unit rates
    ///
    /// # Arguments
    ///
    /// * 'request' - the prepared request
    fn get_page(&self, request: RequestBuilder) -> Result<UnitRates, FetchError> {
        let res = request.send()?;

        if !res.status().is_success() {
            return Err(FetchError::Http(format!("unexpected status: {}", res.status())));
        }

        let json = res.text()?;

        Ok(serde_json::from_str(&json)?)
    }
}

impl RateSource for Octopus {
    fn get_rates(&self, day: NaiveDate) -> Result<DailySeries, FetchError> {
        Octopus::get_rates(self, day)
    }
}

/// Gathers the results of a first page and of the pages its next links lead to
///
/// # Arguments
///
/// * 'first' - the first page
/// * 'day' - the requested day, for error reporting
/// * 'get_next' - retrieves the page behind a next link
fn collect_pages<F>(first: UnitRates, day: NaiveDate, mut get_next: F) -> Result<Vec<PricePoint>, FetchError>
where
    F: FnMut(&str) -> Result<UnitRates, FetchError>,
{
    let mut page = first;
    let mut points: Vec<PricePoint> = Vec::with_capacity(page.count.unwrap_or(48));
    points.append(&mut page.results);

    let mut pages = 1;
    while let Some(next) = page.next.take() {
        if pages >= MAX_PAGES {
            warn!("Stopped following rate pages after {} pages", pages);
            break;
        }
        page = get_next(&next)?;
        points.append(&mut page.results);
        pages += 1;
    }

    if points.is_empty() {
        return Err(FetchError::NoRates(day));
    }

    Ok(points)
}

/// Returns period_from and period_to covering all half-hour slots of a UTC day
///
/// # Arguments
///
/// * 'day' - the day
fn period(day: NaiveDate) -> (String, String) {
    let date = day.format("%Y-%m-%d");
    (format!("{}T00:00Z", date), format!("{}T23:30Z", date))
}
