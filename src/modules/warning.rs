use mongodb::Database;
use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::parse_command;
use teloxide::utils::html::user_mention_or_link;

use crate::config::Config;
use crate::database::db_utils::{adjust_warnings, get_warn_count};
use crate::engine::warnings::{check_warn_target, verdict, WarnVerdict, WARN_LIMIT};
use crate::util::{consts, is_group, require_admin, reply_html, reply_to, sender, target_user};
use crate::TgErr;

fn command_args(msg: &Message) -> Vec<String> {
    msg.text()
        .and_then(|t| parse_command(t, consts::BOT_NAME))
        .map(|(_, args)| args.into_iter().map(str::to_owned).collect())
        .unwrap_or_default()
}

pub async fn warn(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let Some(target) = target_user(msg).cloned() else {
        reply_to(bot, msg, "Reply to a user's message to warn them.").await?;
        return Ok(());
    };
    if let Err(e) = check_warn_target(cfg.owner_id, target.id) {
        reply_to(bot, msg, e.to_string()).await?;
        return Ok(());
    }
    let args = command_args(msg);
    let reason = if args.is_empty() {
        "No reason provided.".to_string()
    } else {
        args.join(" ")
    };
    let chat_id = msg.chat.id.0;
    let user_id = target.id.0 as i64;
    let new_count = adjust_warnings(db, chat_id, user_id, 1).await?;
    match verdict(new_count) {
        WarnVerdict::Escalated => match bot.ban_chat_member(msg.chat.id, target.id).await {
            Ok(_) => {
                // Second write of the warn-then-reset pair; a concurrent
                // /warn can race this reset, which is accepted.
                adjust_warnings(db, chat_id, user_id, -new_count).await?;
                reply_html(
                    bot,
                    msg,
                    format!(
                        "User {} reached {WARN_LIMIT} warnings and has been <b>banned</b>.\nReason: {reason}",
                        user_mention_or_link(&target)
                    ),
                )
                .await?;
            }
            Err(e) => {
                // The warning stays persisted; no rollback.
                reply_to(
                    bot,
                    msg,
                    format!("Could not ban the user. Make sure I am an admin with the ban permission. Error: {e}"),
                )
                .await?;
            }
        },
        WarnVerdict::Warned(count) => {
            reply_html(
                bot,
                msg,
                format!(
                    "User {} has been <b>warned</b> ({count}/{WARN_LIMIT}).\nReason: {reason}",
                    user_mention_or_link(&target)
                ),
            )
            .await?;
        }
    }
    Ok(())
}

pub async fn remove_warn(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let Some(target) = target_user(msg).cloned() else {
        reply_to(bot, msg, "Reply to a user's message to remove a warning.").await?;
        return Ok(());
    };
    let current = get_warn_count(db, msg.chat.id.0, target.id.0 as i64).await?;
    if current == 0 {
        reply_html(
            bot,
            msg,
            format!(
                "User {} has no active warnings to remove.",
                user_mention_or_link(&target)
            ),
        )
        .await?;
        return Ok(());
    }
    let new_count = adjust_warnings(db, msg.chat.id.0, target.id.0 as i64, -1).await?;
    reply_html(
        bot,
        msg,
        format!(
            "Warning removed from {}. Current warnings: {new_count}/{WARN_LIMIT}.",
            user_mention_or_link(&target)
        ),
    )
    .await?;
    Ok(())
}

pub async fn warns(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let target = match target_user(msg) {
        Some(u) => u.clone(),
        None => sender(msg)?.clone(),
    };
    let count = get_warn_count(db, msg.chat.id.0, target.id.0 as i64).await?;
    reply_html(
        bot,
        msg,
        format!(
            "User {} has <b>{count}</b> active warnings.",
            user_mention_or_link(&target)
        ),
    )
    .await?;
    Ok(())
}
