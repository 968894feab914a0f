use std::sync::Arc;

use mongodb::Database;
use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::BotCommands;

mod config;
mod database;
mod engine;
mod error;
mod modules;
mod util;

use config::Config;
use modules::Command;
use util::consts;

pub type TgErr<T> = anyhow::Result<T>;

async fn answer(bot: Bot, msg: Message, cfg: Arc<Config>, db: Database) -> TgErr<()> {
    if let Err(e) = util::track_chat(&db, &msg).await {
        log::warn!("failed to track chat {}: {e}", msg.chat.id);
    }
    let in_group = msg.chat.is_group() || msg.chat.is_supergroup();
    if in_group && modules::enforce_banned_words(&bot, &msg, &cfg, &db).await? {
        // The message is gone, nothing else should act on it.
        return Ok(());
    }
    let Some(text) = msg.text() else {
        return Ok(());
    };
    match Command::parse(text, consts::BOT_NAME) {
        Ok(cmd) => match cmd {
            Command::Start => modules::start_handler(&bot, &msg, &db).await,
            Command::Help => modules::help_handler(&bot, &msg).await,
            Command::Id => modules::get_id(&bot, &msg).await,
            Command::Warn => modules::warn(&bot, &msg, &cfg, &db).await,
            Command::Removewarn => modules::remove_warn(&bot, &msg, &cfg, &db).await,
            Command::Warns => modules::warns(&bot, &msg, &cfg, &db).await,
            Command::Ban => modules::ban(&bot, &msg, &cfg, &db).await,
            Command::Unban => modules::unban(&bot, &msg, &cfg).await,
            Command::Mute => modules::mute(&bot, &msg, &cfg).await,
            Command::Unmute => modules::unmute(&bot, &msg, &cfg).await,
            Command::Promote => modules::promote(&bot, &msg, &cfg).await,
            Command::Lock => modules::lock(&bot, &msg, &cfg).await,
            Command::Unlock => modules::unlock(&bot, &msg, &cfg).await,
            Command::Filter => modules::filter(&bot, &msg, &cfg, &db).await,
            Command::Stop => modules::stop_filter(&bot, &msg, &cfg, &db).await,
            Command::BanWord => modules::ban_word(&bot, &msg, &cfg, &db).await,
            Command::UnbanWord => modules::unban_word(&bot, &msg, &cfg, &db).await,
            Command::SetCountdown => modules::set_countdown_cmd(&bot, &msg, &cfg, &db).await,
            Command::CheckCountdown => modules::check_countdown_cmd(&bot, &msg, &cfg, &db).await,
            Command::Broadcast => modules::broadcast(&bot, &msg, &cfg, &db).await,
        },
        Err(_) => {
            if in_group {
                modules::filter_reply(&bot, &msg, &db).await?;
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let cfg = Arc::new(Config::from_env()?);
    let db = database::db::Db::new(cfg.mongo_uri.clone(), cfg.db_name.clone())
        .client()
        .await?;
    let bot = Bot::new(cfg.bot_token.clone());
    log::info!("starting {} with database {}", consts::BOT_NAME, cfg.db_name);

    let handler = dptree::entry().branch(Update::filter_message().endpoint(answer));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![cfg, db])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "an error from the update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    Ok(())
}
