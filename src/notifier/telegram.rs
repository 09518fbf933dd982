use std::sync::Arc;

use color_eyre::eyre::{self, WrapErr as _};
use secstr::SecUtf8;
use url::Url;

#[derive(Debug, serde::Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Clone)]
pub struct Telegram {
    http: Arc<awc::Client>,
    url: SecUtf8,
    pub chat_id: String,
}

impl Telegram {
    pub fn new(http: Arc<awc::Client>, api_url: &Url, token: &SecUtf8, chat_id: String) -> Self {
        let url = SecUtf8::from(format!(
            "{}/bot{}/sendMessage",
            api_url.as_str().trim_end_matches('/'),
            token.unsecure()
        ));
        Self { http, url, chat_id }
    }

    pub async fn try_notify(&self, text: &str) -> eyre::Result<()> {
        let message = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        let mut resp = self
            .http
            .post(self.url.unsecure())
            .send_form(&message)
            .await
            .map_err(|err| eyre::eyre!("Failed to send request to Telegram: {}", err))?;

        let body = resp
            .body()
            .await
            .wrap_err("Failed to fetch Telegram response body")?;

        if !resp.status().is_success() {
            return Err(eyre::eyre!(
                "Telegram API returned error: {}\n{}",
                resp.status(),
                String::from_utf8_lossy(body.as_ref())
            ));
        }

        Ok(())
    }

    pub async fn notify(self: Arc<Self>, text: String) {
        match self.try_notify(&text).await {
            Ok(()) => tracing::debug!(chat_id = self.chat_id.as_str(), "Telegram message sent"),
            Err(err) => tracing::error!("Failed sending Telegram notification: {}", err),
        }
    }
}
