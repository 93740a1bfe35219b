use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("DeliveryError::Artifact: can't read {path}: {msg}")]
    Artifact { path: PathBuf, msg: String },
    #[error("DeliveryError::Http: {0}")]
    Http(String),
    #[error("DeliveryError::Telegram: {0}")]
    Telegram(String),
}
// The request url holds the bot token, so it must never end up in a message
impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self { DeliveryError::Http(e.without_url().to_string()) }
}
impl From<serde_json::Error> for DeliveryError {
    fn from(e: serde_json::Error) -> Self { DeliveryError::Telegram(format!("unexpected response: {}", e)) }
}
