pub mod errors;

use std::path::Path;
use std::time::Duration;
use log::info;
use reqwest::blocking::{multipart, Client, RequestBuilder};
use crate::config::TelegramParameters;
use crate::manager_telegram::errors::DeliveryError;
use crate::models::telegram::{BotResponse, SendMessage};
use crate::pipeline::Notifier;

pub struct Telegram {
    client: Client,
    api_url: String,
    bot_token: String,
    chat_id: String,
}

impl Telegram {
    /// Returns a new instance of the Telegram struct
    ///
    /// # Arguments
    ///
    /// * 'params' - bot credentials and destination chat
    pub fn new(params: &TelegramParameters) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(
            Self {
                client,
                api_url: params.api_url.trim_end_matches('/').to_string(),
                bot_token: params.bot_token.clone(),
                chat_id: params.chat_id.clone(),
            }
        )
    }

    /// Uploads an image to the chat with the given caption
    ///
    /// # Arguments
    ///
    /// * 'path' - the image to upload
    /// * 'caption' - caption shown beneath the image
    pub fn send_photo(&self, path: &Path, caption: &str) -> Result<(), DeliveryError> {
        let form = multipart::Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_string())
            .file("photo", path)
            .map_err(|e| DeliveryError::Artifact { path: path.to_path_buf(), msg: e.to_string() })?;

        self.call(self.client.post(self.method_url("sendPhoto")).multipart(form))
    }

    /// Sends a plain text message to the chat
    ///
    /// # Arguments
    ///
    /// * 'text' - the message
    pub fn send_message(&self, text: &str) -> Result<(), DeliveryError> {
        let req = SendMessage { chat_id: &self.chat_id, text };

        self.call(self.client.post(self.method_url("sendMessage")).json(&req))
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.bot_token, method)
    }

    /// Sends a Bot API request and checks the response envelope
    ///
    /// # Arguments
    ///
    /// * 'request' - the prepared request
    fn call(&self, request: RequestBuilder) -> Result<(), DeliveryError> {
        let res = request.send()?;
        let status = res.status();
        let json = res.text()?;

        check_response(status.is_success(), &json)
    }
}

impl Notifier for Telegram {
    fn send_artifact(&self, path: &Path, caption: &str) -> Result<(), DeliveryError> {
        info!("Sending {} to Telegram", path.display());
        self.send_photo(path, caption)?;
        info!("{} sent successfully", path.display());
        Ok(())
    }

    fn send_error(&self, message: &str) -> Result<(), DeliveryError> {
        self.send_message(&format!("❌ Error: {}", message))
    }
}

/// Interprets a Bot API response body
///
/// # Arguments
///
/// * 'success' - whether the http status was a success status
/// * 'json' - the response body
fn check_response(success: bool, json: &str) -> Result<(), DeliveryError> {
    let response: BotResponse = match serde_json::from_str(json) {
        Ok(r) => r,
        Err(_) if !success => return Err(DeliveryError::Http(format!("unexpected response: {}", json))),
        Err(e) => return Err(DeliveryError::from(e)),
    };

    if success && response.ok {
        Ok(())
    } else {
        Err(DeliveryError::Telegram(response.description.unwrap_or("request not ok".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_response_is_accepted() {
        let json = r#"{"ok":true,"result":{"message_id":12,"chat":{"id":-1001}}}"#;

        assert!(check_response(true, json).is_ok());
    }

    #[test]
    fn not_ok_response_carries_description() {
        let json = r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#;

        match check_response(false, json) {
            Err(DeliveryError::Telegram(msg)) => assert_eq!(msg, "Bad Request: chat not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn non_json_error_body() {
        assert!(matches!(check_response(false, "<html>Bad Gateway</html>"), Err(DeliveryError::Http(_))));
    }

    #[test]
    fn missing_image_is_an_artifact_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agile_prices.png");
        let telegram = Telegram::new(&TelegramParameters {
            api_url: "http://127.0.0.1:9".to_string(),
            bot_token: "123:abc".to_string(),
            chat_id: "-1001".to_string(),
        }).unwrap();

        match telegram.send_photo(&path, "caption") {
            Err(DeliveryError::Artifact { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn method_url_contains_token() {
        let telegram = Telegram::new(&TelegramParameters {
            api_url: "https://api.telegram.org/".to_string(),
            bot_token: "123:abc".to_string(),
            chat_id: "-1001".to_string(),
        }).unwrap();

        assert_eq!(telegram.method_url("sendMessage"), "https://api.telegram.org/bot123:abc/sendMessage");
    }
}
