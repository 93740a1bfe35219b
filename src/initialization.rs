use log::info;
use crate::config::Config;
use crate::errors::AppError;
use crate::manager_octopus::Octopus;
use crate::manager_telegram::Telegram;
use crate::presentation::PngPresenter;
use crate::run_marker::FileRunMarker;

/// The collaborators a daily run works with
pub struct Mgr<S, P, N, M> {
    pub source: S,
    pub presenter: P,
    pub notifier: N,
    pub marker: M,
}

/// Initializes and returns the production collaborators given the configuration
///
/// # Arguments
///
/// * 'config' - the loaded configuration
pub fn init(config: &Config) -> Result<Mgr<Octopus, PngPresenter, Telegram, FileRunMarker>, AppError> {
    info!("agilepost version: {}", env!("CARGO_PKG_VERSION"));
    info!("Product {}, tariff {}", config.octopus.product_code, config.octopus.tariff_code);

    let source = Octopus::new(&config.octopus)?;
    let presenter = PngPresenter::new(&config.files, &config.tariff, config.general.timezone);
    let notifier = Telegram::new(&config.telegram)?;
    let marker = FileRunMarker::new(&config.files.last_run_file, config.general.timezone);

    Ok(Mgr { source, presenter, notifier, marker })
}
