use chrono::{Duration, Utc};
use mongodb::Database;
use teloxide::payloads::{PromoteChatMemberSetters, RestrictChatMemberSetters};
use teloxide::prelude::*;
use teloxide::types::{ChatPermissions, Message, UserId};
use teloxide::utils::command::parse_command;
use teloxide::utils::html::user_mention_or_link;

use crate::config::Config;
use crate::database::db_utils::{adjust_warnings, get_warn_count};
use crate::engine::permissions::{compute, Feature, PermissionSet, PermissionSnapshot};
use crate::util::{consts, is_group, require_admin, reply_html, reply_to};
use crate::TgErr;

fn to_chat_permissions(p: PermissionSet) -> ChatPermissions {
    let mut flags = ChatPermissions::empty();
    if p.send_messages {
        flags |= ChatPermissions::SEND_MESSAGES;
    }
    if p.send_audios {
        flags |= ChatPermissions::SEND_AUDIOS;
    }
    if p.send_documents {
        flags |= ChatPermissions::SEND_DOCUMENTS;
    }
    if p.send_photos {
        flags |= ChatPermissions::SEND_PHOTOS;
    }
    if p.send_videos {
        flags |= ChatPermissions::SEND_VIDEOS;
    }
    if p.send_video_notes {
        flags |= ChatPermissions::SEND_VIDEO_NOTES;
    }
    if p.send_voice_notes {
        flags |= ChatPermissions::SEND_VOICE_NOTES;
    }
    if p.send_polls {
        flags |= ChatPermissions::SEND_POLLS;
    }
    if p.send_other_messages {
        flags |= ChatPermissions::SEND_OTHER_MESSAGES;
    }
    if p.add_web_page_previews {
        flags |= ChatPermissions::ADD_WEB_PAGE_PREVIEWS;
    }
    flags
}

fn snapshot_from_flags(p: ChatPermissions) -> PermissionSnapshot {
    PermissionSnapshot {
        send_messages: Some(p.contains(ChatPermissions::SEND_MESSAGES)),
        send_audios: Some(p.contains(ChatPermissions::SEND_AUDIOS)),
        send_documents: Some(p.contains(ChatPermissions::SEND_DOCUMENTS)),
        send_photos: Some(p.contains(ChatPermissions::SEND_PHOTOS)),
        send_videos: Some(p.contains(ChatPermissions::SEND_VIDEOS)),
        send_video_notes: Some(p.contains(ChatPermissions::SEND_VIDEO_NOTES)),
        send_voice_notes: Some(p.contains(ChatPermissions::SEND_VOICE_NOTES)),
        send_polls: Some(p.contains(ChatPermissions::SEND_POLLS)),
        send_other_messages: Some(p.contains(ChatPermissions::SEND_OTHER_MESSAGES)),
        add_web_page_previews: Some(p.contains(ChatPermissions::ADD_WEB_PAGE_PREVIEWS)),
    }
}

/// Fetches the current default permissions of the chat. When the query fails
/// or Telegram reports nothing, the snapshot stays unknown and folds to
/// permissive.
async fn current_snapshot(bot: &Bot, chat_id: ChatId) -> PermissionSnapshot {
    match bot.get_chat(chat_id).await {
        Ok(chat) => chat
            .permissions()
            .map(snapshot_from_flags)
            .unwrap_or_default(),
        Err(e) => {
            log::warn!("could not fetch current permissions of chat {chat_id}: {e}");
            PermissionSnapshot::default()
        }
    }
}

async fn handle_lock_unlock(
    bot: &Bot,
    msg: &Message,
    cfg: &Config,
    lock: bool,
) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let text = msg.text().unwrap_or_default();
    let Some((_, args)) = parse_command(text, consts::BOT_NAME) else {
        return Ok(());
    };
    let Some(raw_feature) = args.first() else {
        reply_to(
            bot,
            msg,
            "Usage: /lock <feature> or /unlock <feature>. Features: all, text, stickers, media, images, audio.",
        )
        .await?;
        return Ok(());
    };
    let feature = match raw_feature.parse::<Feature>() {
        Ok(f) => f,
        Err(e) => {
            reply_to(bot, msg, e.to_string()).await?;
            return Ok(());
        }
    };
    let snapshot = current_snapshot(bot, msg.chat.id).await;
    let next = compute(feature, lock, snapshot);
    match bot
        .set_chat_permissions(msg.chat.id, to_chat_permissions(next))
        .await
    {
        Ok(_) => {
            let action = if lock { "locked" } else { "unlocked" };
            reply_to(
                bot,
                msg,
                format!("Feature '{feature}' has been {action} for general members."),
            )
            .await?;
        }
        Err(e) => {
            reply_to(
                bot,
                msg,
                format!("Could not update chat permissions. Make sure I am an admin that can manage the group. Error: {e}"),
            )
            .await?;
        }
    }
    Ok(())
}

pub async fn lock(bot: &Bot, msg: &Message, cfg: &Config) -> TgErr<()> {
    handle_lock_unlock(bot, msg, cfg, true).await
}

pub async fn unlock(bot: &Bot, msg: &Message, cfg: &Config) -> TgErr<()> {
    handle_lock_unlock(bot, msg, cfg, false).await
}

pub async fn ban(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let Some(target) = msg.reply_to_message().and_then(|m| m.from.clone()) else {
        reply_to(bot, msg, "Reply to a user's message to ban them.").await?;
        return Ok(());
    };
    let args_reason = msg
        .text()
        .and_then(|t| parse_command(t, consts::BOT_NAME))
        .map(|(_, args)| args.join(" "))
        .unwrap_or_default();
    let reason = if args_reason.is_empty() {
        "No reason provided.".to_string()
    } else {
        args_reason
    };
    match bot.ban_chat_member(msg.chat.id, target.id).await {
        Ok(_) => {
            // A banned user starts clean if they ever come back.
            let count = get_warn_count(db, msg.chat.id.0, target.id.0 as i64).await?;
            if count > 0 {
                adjust_warnings(db, msg.chat.id.0, target.id.0 as i64, -count).await?;
            }
            reply_html(
                bot,
                msg,
                format!(
                    "User {} has been <b>banned</b>.\nReason: {reason}",
                    user_mention_or_link(&target)
                ),
            )
            .await?;
        }
        Err(e) => {
            reply_to(
                bot,
                msg,
                format!("Could not ban the user. Make sure I am an admin with the ban permission. Error: {e}"),
            )
            .await?;
        }
    }
    Ok(())
}

pub async fn unban(bot: &Bot, msg: &Message, cfg: &Config) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let text = msg.text().unwrap_or_default();
    let user_id = parse_command(text, consts::BOT_NAME)
        .and_then(|(_, args)| args.first().and_then(|a| a.parse::<u64>().ok()));
    let Some(user_id) = user_id else {
        reply_to(
            bot,
            msg,
            "Provide the numeric user id to unban. Usage: /unban 123456789",
        )
        .await?;
        return Ok(());
    };
    match bot.unban_chat_member(msg.chat.id, UserId(user_id)).await {
        Ok(_) => {
            reply_to(bot, msg, format!("User {user_id} has been unbanned.")).await?;
        }
        Err(e) => {
            reply_to(bot, msg, format!("Could not unban the user. Error: {e}")).await?;
        }
    }
    Ok(())
}

pub async fn mute(bot: &Bot, msg: &Message, cfg: &Config) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let Some(target) = msg.reply_to_message().and_then(|m| m.from.clone()) else {
        reply_to(bot, msg, "Reply to a user's message to mute them.").await?;
        return Ok(());
    };
    // Default mute duration is one hour; a leading numeric argument is taken
    // as minutes.
    let minutes = msg
        .text()
        .and_then(|t| parse_command(t, consts::BOT_NAME))
        .and_then(|(_, args)| args.first().and_then(|a| a.parse::<i64>().ok()))
        .filter(|m| *m > 0)
        .unwrap_or(60);
    let until = Utc::now() + Duration::minutes(minutes);
    match bot
        .restrict_chat_member(msg.chat.id, target.id, ChatPermissions::empty())
        .until_date(until)
        .await
    {
        Ok(_) => {
            reply_html(
                bot,
                msg,
                format!(
                    "User {} has been <b>muted</b> for {minutes} minutes.",
                    user_mention_or_link(&target)
                ),
            )
            .await?;
        }
        Err(e) => {
            reply_to(
                bot,
                msg,
                format!("Could not mute the user. Make sure I am an admin with the restrict permission. Error: {e}"),
            )
            .await?;
        }
    }
    Ok(())
}

pub async fn unmute(bot: &Bot, msg: &Message, cfg: &Config) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let Some(target) = msg.reply_to_message().and_then(|m| m.from.clone()) else {
        reply_to(bot, msg, "Reply to a user's message to unmute them.").await?;
        return Ok(());
    };
    match bot
        .restrict_chat_member(
            msg.chat.id,
            target.id,
            to_chat_permissions(PermissionSet::allow_all()),
        )
        .await
    {
        Ok(_) => {
            reply_html(
                bot,
                msg,
                format!(
                    "User {} has been <b>unmuted</b>.",
                    user_mention_or_link(&target)
                ),
            )
            .await?;
        }
        Err(e) => {
            reply_to(bot, msg, format!("Could not unmute the user. Error: {e}")).await?;
        }
    }
    Ok(())
}

pub async fn promote(bot: &Bot, msg: &Message, cfg: &Config) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let Some(target) = msg.reply_to_message().and_then(|m| m.from.clone()) else {
        reply_to(bot, msg, "Reply to a user's message to promote them.").await?;
        return Ok(());
    };
    // Standard admin set: no promote and no change-info rights.
    match bot
        .promote_chat_member(msg.chat.id, target.id)
        .can_manage_chat(true)
        .can_delete_messages(true)
        .can_restrict_members(true)
        .can_pin_messages(true)
        .await
    {
        Ok(_) => {
            reply_html(
                bot,
                msg,
                format!(
                    "User {} has been <b>promoted</b> to administrator.",
                    user_mention_or_link(&target)
                ),
            )
            .await?;
        }
        Err(e) => {
            reply_to(
                bot,
                msg,
                format!("Could not promote the user. Make sure I have the add-admins permission. Error: {e}"),
            )
            .await?;
        }
    }
    Ok(())
}
