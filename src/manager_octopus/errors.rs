use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("FetchError::Http: {0}")]
    Http(String),
    #[error("FetchError::Document: {0}")]
    Document(String),
    #[error("FetchError::NoRates: no rates returned for {0}")]
    NoRates(NaiveDate),
}
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self { FetchError::Http(e.to_string()) }
}
impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self { FetchError::Document(e.to_string()) }
}
