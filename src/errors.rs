use std::fmt;
use thiserror::Error;
use crate::manager_octopus::errors::FetchError;
use crate::manager_telegram::errors::DeliveryError;

#[derive(Error, Debug)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(e.to_string()) }
}

#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("insufficient data: no price points to compute windows from")]
    InsufficientData,
    #[error("invalid tariff parameters: {0}")]
    InvalidParameters(String),
}

#[derive(Error, Debug)]
#[error("error rendering {artifact}: {msg}")]
pub struct RenderError {
    pub artifact: &'static str,
    pub msg: String,
}
impl RenderError {
    pub fn new(artifact: &'static str, e: impl fmt::Display) -> RenderError {
        RenderError { artifact, msg: e.to_string() }
    }
}

#[derive(Error, Debug)]
#[error("error accessing last run marker: {0}")]
pub struct MarkerError(pub String);
impl From<std::io::Error> for MarkerError {
    fn from(e: std::io::Error) -> Self { MarkerError(e.to_string()) }
}

/// Any error that aborts a daily run
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error(transparent)]
    Marker(#[from] MarkerError),
}

impl AppError {
    /// Short classification of the error, used as log caption
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch failure",
            AppError::Engine(_) => "computation failure",
            AppError::Render(_) => "render failure",
            AppError::Delivery(_) => "delivery failure",
            AppError::Marker(_) => "marker failure",
        }
    }
}
