use mongodb::Database;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Message, ParseMode};

use crate::config::Config;
use crate::database::db_utils::get_broadcast_chats;
use crate::engine::broadcast::fanout;
use crate::util::{reply_to, require_owner};
use crate::TgErr;

/// Owner-only fan-out of a message to every chat the bot has seen.
pub async fn broadcast(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    require_owner(bot, cfg, msg).await?;
    let text = msg.text().unwrap_or_default();
    let body = text
        .splitn(2, char::is_whitespace)
        .nth(1)
        .map(str::trim)
        .filter(|b| !b.is_empty());
    let Some(body) = body else {
        reply_to(bot, msg, "Usage: /broadcast <message>").await?;
        return Ok(());
    };
    let targets = get_broadcast_chats(db).await?;
    let (sent, failed) = fanout(targets, msg.chat.id.0, |chat_id| {
        let bot = bot.clone();
        let body = body.to_string();
        async move {
            bot.send_message(ChatId(chat_id), body)
                .parse_mode(ParseMode::Html)
                .await?;
            Ok(())
        }
    })
    .await;
    reply_to(
        bot,
        msg,
        format!("Broadcast complete! Sent to {sent} chats. Failed for {failed} chats."),
    )
    .await?;
    Ok(())
}
