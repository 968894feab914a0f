use anyhow::{Context, Result};
use teloxide::types::UserId;

/// Process configuration, read once at startup and passed by reference
/// everywhere else. Nothing in here is mutable after boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub owner_id: UserId,
    pub mongo_uri: String,
    pub db_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bot_token = dotenvy::var("TELOXIDE_TOKEN").context("TELOXIDE_TOKEN is not defined")?;
        let owner_id = dotenvy::var("OWNER_ID")
            .context("OWNER_ID is not defined")?
            .parse::<u64>()
            .context("OWNER_ID must be a numeric Telegram user id")?;
        let mongo_uri = dotenvy::var("MONGO_URI").context("MONGO_URI is not defined")?;
        let db_name = dotenvy::var("DB_NAME").unwrap_or_else(|_| "grpsentry".to_string());
        Ok(Config {
            bot_token,
            owner_id: UserId(owner_id),
            mongo_uri,
            db_name,
        })
    }

    pub fn is_owner(&self, id: UserId) -> bool {
        id == self.owner_id
    }
}
