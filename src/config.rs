use secstr::SecUtf8;
use serde::{Deserialize, Deserializer};
use url::Url;

pub const ENV_PREFIX: &str = "GLRELAY_";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_secutf8")]
    pub telegram_token: SecUtf8,
    pub telegram_chat_id: String,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: Url,
    /// Base URL of the GitLab instance. Not used for link construction yet.
    pub gitlab_url: Url,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("`{}TELEGRAM_TOKEN` must not be empty", ENV_PREFIX)]
    EmptyToken,
    #[error("`{}TELEGRAM_CHAT_ID` must not be empty", ENV_PREFIX)]
    EmptyChatId,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram_token.unsecure().trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        if self.telegram_chat_id.trim().is_empty() {
            return Err(ConfigError::EmptyChatId);
        }
        Ok(())
    }
}

fn default_telegram_api_url() -> Url {
    Url::parse("https://api.telegram.org").expect("hardcoded URL is valid")
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_owned()
}

fn deserialize_secutf8<'de, D>(de: D) -> Result<SecUtf8, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(de).map(SecUtf8::from)
}
