pub mod chart;
pub mod table;

use std::path::{Path, PathBuf};
use chrono_tz::Tz;
use log::info;
use crate::config::{Files, TariffParameters};
use crate::errors::RenderError;
use crate::models::daily_series::DailySeries;
use crate::pipeline::Presenter;
use crate::presentation::chart::render_price_chart;
use crate::presentation::table::render_window_table;
use crate::window_cost::TableRow;

/// Renders the daily artifacts as PNG images at fixed paths
pub struct PngPresenter {
    chart_path: PathBuf,
    table_path: PathBuf,
    tariff: TariffParameters,
    tz: Tz,
}

impl PngPresenter {
    /// Returns a new instance of the PngPresenter struct
    ///
    /// # Arguments
    ///
    /// * 'files' - where to write the artifacts
    /// * 'tariff' - tariff parameters shown in the chart
    /// * 'tz' - timezone for time labels
    pub fn new(files: &Files, tariff: &TariffParameters, tz: Tz) -> PngPresenter {
        PngPresenter {
            chart_path: Path::new(&files.chart_path).to_path_buf(),
            table_path: Path::new(&files.table_path).to_path_buf(),
            tariff: tariff.clone(),
            tz,
        }
    }
}

impl Presenter for PngPresenter {
    fn render_chart(&self, series: &DailySeries) -> Result<PathBuf, RenderError> {
        render_price_chart(series, &self.tariff, &self.tz, &self.chart_path)?;
        info!("Chart saved at {}", self.chart_path.display());

        Ok(self.chart_path.clone())
    }

    fn render_table(&self, rows: &[TableRow]) -> Result<PathBuf, RenderError> {
        render_window_table(rows, &self.tz, &self.table_path)?;
        info!("Table saved at {}", self.table_path.display());

        Ok(self.table_path.clone())
    }
}
