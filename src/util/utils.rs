use anyhow::anyhow;
use chrono::Utc;
use mongodb::Database;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode, ReplyParameters, User, UserId};

use crate::config::Config;
use crate::database::db_utils::upsert_broadcast_chat;
use crate::database::BroadcastChat;
use crate::engine::roles::{group_command_allowed, require_privileged, role_from_status, UserRole};
use crate::error::EngineError;
use crate::TgErr;

pub async fn reply_to(bot: &Bot, msg: &Message, text: impl Into<String>) -> TgErr<Message> {
    let sent = bot
        .send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(sent)
}

pub async fn reply_html(bot: &Bot, msg: &Message, text: impl Into<String>) -> TgErr<Message> {
    let sent = bot
        .send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(sent)
}

pub fn sender(msg: &Message) -> TgErr<&User> {
    msg.from
        .as_ref()
        .ok_or_else(|| anyhow!("message has no sender"))
}

/// The user a moderation command acts on: the author of the replied-to
/// message.
pub fn target_user(msg: &Message) -> Option<&User> {
    msg.reply_to_message().and_then(|m| m.from.as_ref())
}

/// Gate for group-only commands. The configured owner passes even from a
/// private chat, so the bot can be driven directly.
pub async fn is_group(bot: &Bot, cfg: &Config, msg: &Message) -> TgErr<()> {
    let in_group = msg.chat.is_group() || msg.chat.is_supergroup();
    let is_owner = msg.from.as_ref().is_some_and(|u| cfg.is_owner(u.id));
    if group_command_allowed(in_group, is_owner) {
        return Ok(());
    }
    reply_to(bot, msg, "This command only works in groups.").await?;
    Err(anyhow!("not a group chat"))
}

/// Resolves the acting user's role. The configured owner is `Owner`
/// everywhere, even outside a group; everyone else needs a live membership
/// lookup, and a failed lookup propagates instead of granting anything.
pub async fn resolve_role(
    bot: &Bot,
    cfg: &Config,
    chat_id: ChatId,
    user_id: UserId,
) -> Result<UserRole, EngineError> {
    if cfg.is_owner(user_id) {
        return Ok(UserRole::Owner);
    }
    let member = bot
        .get_chat_member(chat_id, user_id)
        .await
        .map_err(|e| EngineError::Collaborator(e.into()))?;
    Ok(role_from_status(member.status()))
}

/// Authorization guard for every privileged command. Replies to the chat and
/// short-circuits the handler when the actor is a plain member.
pub async fn require_admin(bot: &Bot, cfg: &Config, msg: &Message) -> TgErr<UserRole> {
    let from = sender(msg)?;
    let role = resolve_role(bot, cfg, msg.chat.id, from.id).await?;
    match require_privileged(role) {
        Ok(role) => Ok(role),
        Err(e) => {
            reply_to(bot, msg, e.to_string()).await?;
            Err(e.into())
        }
    }
}

pub async fn require_owner(bot: &Bot, cfg: &Config, msg: &Message) -> TgErr<()> {
    let from = sender(msg)?;
    if cfg.is_owner(from.id) {
        return Ok(());
    }
    reply_to(bot, msg, "This command is restricted to the bot owner.").await?;
    Err(EngineError::Authorization("owner-only command".to_string()).into())
}

/// Upserts the chat into the broadcast recipient list.
pub async fn track_chat(db: &Database, msg: &Message) -> TgErr<()> {
    let chat_kind = if msg.chat.is_private() {
        "private"
    } else if msg.chat.is_supergroup() {
        "supergroup"
    } else if msg.chat.is_group() {
        "group"
    } else {
        return Ok(());
    };
    let title = msg
        .chat
        .title()
        .map(str::to_owned)
        .or_else(|| msg.from.as_ref().map(|u| u.full_name()))
        .unwrap_or_default();
    let record = BroadcastChat {
        chat_id: msg.chat.id.0,
        chat_kind: chat_kind.to_string(),
        title,
        last_active: Utc::now().timestamp(),
    };
    upsert_broadcast_chat(db, &record).await?;
    Ok(())
}
