use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
}

/// Envelope returned by every Bot API method, the result itself is of no interest here
#[derive(Deserialize, Debug)]
pub struct BotResponse {
    pub ok: bool,
    pub description: Option<String>,
}
