use std::path::{Path, PathBuf};
use chrono::NaiveDate;
use chrono_tz::Tz;
use log::{error, info};
use crate::config::TariffParameters;
use crate::errors::{AppError, RenderError};
use crate::initialization::Mgr;
use crate::manager_octopus::errors::FetchError;
use crate::manager_telegram::errors::DeliveryError;
use crate::models::daily_series::DailySeries;
use crate::run_marker::RunMarker;
use crate::window_cost::{compare_tariffs, TableRow};

pub const CHART_CAPTION: &str = "📊 Agile prices for tomorrow";
pub const TABLE_CAPTION: &str = "📊 Optimum tariff tomorrow";

/// Supplies the unit prices of a day
pub trait RateSource {
    fn get_rates(&self, day: NaiveDate) -> Result<DailySeries, FetchError>;
}

/// Produces the image artifacts and returns where they were written
pub trait Presenter {
    fn render_chart(&self, series: &DailySeries) -> Result<PathBuf, RenderError>;
    fn render_table(&self, rows: &[TableRow]) -> Result<PathBuf, RenderError>;
}

/// Posts artifacts and error reports to the notification channel
pub trait Notifier {
    fn send_artifact(&self, path: &Path, caption: &str) -> Result<(), DeliveryError>;
    fn send_error(&self, message: &str) -> Result<(), DeliveryError>;
}

/// How a run ended when it didn't fail
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    AlreadyRun,
    Posted,
}

/// Runs the daily post unless it has already been made today.
///
/// Errors while fetching, computing, rendering, delivering or marking are logged and
/// reported through the notifier before being returned. The run marker is only updated
/// after everything has been delivered, so a failed run is retried on the next invocation.
///
/// # Arguments
///
/// * 'mgr' - the collaborators to use
/// * 'tariff' - tariff and consumption parameters
/// * 'tz' - civil timezone for presenting start times
/// * 'day' - the day to post prices for
pub fn run<S, P, N, M>(mgr: &mut Mgr<S, P, N, M>, tariff: &TariffParameters, tz: &Tz, day: NaiveDate) -> Result<Outcome, AppError>
where
    S: RateSource,
    P: Presenter,
    N: Notifier,
    M: RunMarker,
{
    if mgr.marker.has_run_today()? {
        info!("Already posted today, exiting");
        return Ok(Outcome::AlreadyRun);
    }

    if let Err(e) = post_day(mgr, tariff, tz, day) {
        error!("An error occurred ({}): {}", e.kind(), e);
        info!("Sending error notification");
        if let Err(send_error) = mgr.notifier.send_error(&e.to_string()) {
            error!("Error notification could not be sent: {}", send_error);
        }
        return Err(e);
    }

    Ok(Outcome::Posted)
}

/// Fetches, computes, renders and delivers the given day's artifacts, then marks the run
///
/// # Arguments
///
/// * 'mgr' - the collaborators to use
/// * 'tariff' - tariff and consumption parameters
/// * 'tz' - civil timezone for presenting start times
/// * 'day' - the day to post prices for
fn post_day<S, P, N, M>(mgr: &mut Mgr<S, P, N, M>, tariff: &TariffParameters, tz: &Tz, day: NaiveDate) -> Result<(), AppError>
where
    S: RateSource,
    P: Presenter,
    N: Notifier,
    M: RunMarker,
{
    let series = mgr.source.get_rates(day)?;
    info!("Comparing tariffs over {} slots", series.len());

    let rows = compare_tariffs(&series, tariff)?
        .iter()
        .map(|r| r.to_row(tz))
        .collect::<Vec<TableRow>>();
    for row in &rows {
        info!("{}", row);
    }

    let chart = mgr.presenter.render_chart(&series)?;
    let table = mgr.presenter.render_table(&rows)?;

    mgr.notifier.send_artifact(&chart, CHART_CAPTION)?;
    mgr.notifier.send_artifact(&table, TABLE_CAPTION)?;

    mgr.marker.mark_run_today()?;

    Ok(())
}
