use mongodb::Database;
use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::BotCommands;
use teloxide::utils::html::user_mention_or_link;

use super::commands::Command;
use crate::util::{reply_html, reply_to, sender, track_chat};
use crate::TgErr;

pub async fn start_handler(bot: &Bot, msg: &Message, db: &Database) -> TgErr<()> {
    let greeting = format!(
        "Hello {}! I am a group moderation bot.\nSend /help to see the available commands.",
        user_mention_or_link(sender(msg)?)
    );
    reply_html(bot, msg, greeting).await?;
    if let Err(e) = track_chat(db, msg).await {
        log::warn!("failed to register chat {} for broadcast: {e}", msg.chat.id);
    }
    Ok(())
}

pub async fn help_handler(bot: &Bot, msg: &Message) -> TgErr<()> {
    reply_to(bot, msg, Command::descriptions().to_string()).await?;
    Ok(())
}
