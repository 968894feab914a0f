use mongodb::Database;
use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode};
use teloxide::utils::command::parse_command;
use teloxide::utils::html::{self, user_mention_or_link};

use crate::config::Config;
use crate::database::db_utils::{add_banned_word, get_banned_words, rm_banned_word};
use crate::database::BannedWord;
use crate::engine::censor::{evaluate, Verdict};
use crate::engine::filters::normalize_key;
use crate::engine::roles::UserRole;
use crate::util::{consts, is_group, require_admin, reply_html, reply_to, resolve_role};
use crate::TgErr;

pub async fn ban_word(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let text = msg.text().unwrap_or_default();
    let Some((_, args)) = parse_command(text, consts::BOT_NAME) else {
        return Ok(());
    };
    let Some(raw_word) = args.first() else {
        reply_to(bot, msg, "Usage: /ban_word <word>").await?;
        return Ok(());
    };
    let word = normalize_key(raw_word);
    let bw = BannedWord {
        chat_id: msg.chat.id.0,
        word: word.clone(),
    };
    add_banned_word(db, &bw).await?;
    reply_html(
        bot,
        msg,
        format!(
            "Word {} has been banned. Messages containing it will be deleted.",
            html::code_inline(&word)
        ),
    )
    .await?;
    Ok(())
}

pub async fn unban_word(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let text = msg.text().unwrap_or_default();
    let Some((_, args)) = parse_command(text, consts::BOT_NAME) else {
        return Ok(());
    };
    let Some(raw_word) = args.first() else {
        reply_to(bot, msg, "Usage: /unban_word <word>").await?;
        return Ok(());
    };
    let word = normalize_key(raw_word);
    if rm_banned_word(db, msg.chat.id.0, &word).await? {
        reply_html(
            bot,
            msg,
            format!("Word {} has been unbanned.", html::code_inline(&word)),
        )
        .await?;
    } else {
        reply_html(
            bot,
            msg,
            format!(
                "Word {} was not found in the banned list.",
                html::code_inline(&word)
            ),
        )
        .await?;
    }
    Ok(())
}

/// Runs a group message through the banned-word set. Returns whether the
/// message was deleted, so the caller can skip further processing of it.
pub async fn enforce_banned_words(
    bot: &Bot,
    msg: &Message,
    cfg: &Config,
    db: &Database,
) -> TgErr<bool> {
    let Some(text) = msg.text() else {
        return Ok(false);
    };
    let Some(from) = msg.from.clone() else {
        return Ok(false);
    };
    // A failed role lookup denies the censorship bypass, it never grants it.
    let role = match resolve_role(bot, cfg, msg.chat.id, from.id).await {
        Ok(role) => role,
        Err(e) => {
            log::warn!("role lookup failed during censorship, treating as member: {e}");
            UserRole::Member
        }
    };
    let banned = get_banned_words(db, msg.chat.id.0).await?;
    let Verdict::Delete(word) = evaluate(role, &banned, text) else {
        return Ok(false);
    };
    match bot.delete_message(msg.chat.id, msg.id).await {
        Ok(_) => {
            // Best effort; a failed notification is not worth escalating.
            let notice = format!(
                "{}, your message was deleted for using a banned word: {}.",
                user_mention_or_link(&from),
                html::code_inline(&word)
            );
            if let Err(e) = bot
                .send_message(msg.chat.id, notice)
                .parse_mode(ParseMode::Html)
                .await
            {
                log::warn!("failed to send banned-word notice in chat {}: {e}", msg.chat.id);
            }
            Ok(true)
        }
        Err(e) => {
            log::warn!(
                "failed to delete banned-word message in chat {}: {e}",
                msg.chat.id
            );
            Ok(false)
        }
    }
}
