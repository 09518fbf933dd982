mod telegram;

use std::{fmt, sync::Arc};

use actix::prelude::*;
use secstr::SecUtf8;
use url::Url;

use self::telegram::Telegram;

#[derive(Debug, Clone, Message)]
#[rtype(result = "()")]
pub struct Notification {
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_api_url: Url,
    pub telegram_token: SecUtf8,
    pub telegram_chat_id: String,
}

#[derive(Clone)]
pub struct Notifier {
    telegram: Arc<Telegram>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("telegram", &self.telegram.chat_id)
            .finish()
    }
}

impl Notifier {
    pub fn new(config: Config) -> Self {
        let http = Arc::new(awc::Client::new());
        let Config {
            telegram_api_url,
            telegram_token,
            telegram_chat_id,
        } = config;
        let telegram = Arc::new(Telegram::new(
            http,
            &telegram_api_url,
            &telegram_token,
            telegram_chat_id,
        ));
        Self { telegram }
    }
}

impl Actor for Notifier {
    type Context = Context<Self>;
}

impl Handler<Notification> for Notifier {
    type Result = ResponseFuture<()>;

    fn handle(&mut self, msg: Notification, _ctx: &mut Self::Context) -> Self::Result {
        Box::pin(self.telegram.clone().notify(msg.text))
    }
}
