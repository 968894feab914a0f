use mongodb::Database;
use teloxide::payloads::{SendPhotoSetters, SendStickerSetters};
use teloxide::prelude::*;
use teloxide::types::{InputFile, Message, ReplyParameters};
use teloxide::utils::command::parse_command;
use teloxide::utils::html;

use crate::config::Config;
use crate::database::db_utils::{get_filters, rm_filter, set_filter};
use crate::database::Filter;
use crate::engine::filters::{first_match, normalize_key, ReplyKind};
use crate::util::{consts, is_group, require_admin, reply_html, reply_to};
use crate::TgErr;

/// Extracts the reply payload for a new filter from the replied-to message.
fn filter_payload(reply: &Message) -> Option<(ReplyKind, String)> {
    if let Some(text) = reply.text() {
        return Some((ReplyKind::Text, text.to_string()));
    }
    if let Some(sticker) = reply.sticker() {
        return Some((ReplyKind::Sticker, sticker.file.id.clone()));
    }
    if let Some(photos) = reply.photo() {
        // Last entry is the highest resolution.
        if let Some(best) = photos.last() {
            return Some((ReplyKind::Photo, best.file.id.clone()));
        }
    }
    None
}

pub async fn filter(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let text = msg.text().unwrap_or_default();
    let Some((_, args)) = parse_command(text, consts::BOT_NAME) else {
        return Ok(());
    };
    let Some(raw_keyword) = args.first() else {
        reply_to(
            bot,
            msg,
            "Provide a keyword for the filter. Usage: reply to a message with /filter <keyword>",
        )
        .await?;
        return Ok(());
    };
    let Some(reply) = msg.reply_to_message() else {
        reply_to(
            bot,
            msg,
            "Reply to the message (text, sticker or image) you want to filter.",
        )
        .await?;
        return Ok(());
    };
    let Some((kind, content)) = filter_payload(reply) else {
        reply_to(
            bot,
            msg,
            "Unsupported message type. Only text, stickers and photos can be saved as filters.",
        )
        .await?;
        return Ok(());
    };
    let keyword = normalize_key(raw_keyword);
    // Redefining a keyword overwrites the previous filter.
    let fl = Filter {
        chat_id: msg.chat.id.0,
        keyword: keyword.clone(),
        kind: kind.as_str().to_string(),
        content,
    };
    set_filter(db, &fl).await?;
    reply_html(
        bot,
        msg,
        format!(
            "Saved filter {}. I will reply with the saved {} whenever that word is used.",
            html::code_inline(&keyword),
            kind.as_str()
        ),
    )
    .await?;
    Ok(())
}

pub async fn stop_filter(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let text = msg.text().unwrap_or_default();
    let Some((_, args)) = parse_command(text, consts::BOT_NAME) else {
        return Ok(());
    };
    let Some(raw_keyword) = args.first() else {
        reply_to(bot, msg, "Provide the keyword of the filter to stop. Usage: /stop <keyword>")
            .await?;
        return Ok(());
    };
    let keyword = normalize_key(raw_keyword);
    if rm_filter(db, msg.chat.id.0, &keyword).await? {
        reply_html(
            bot,
            msg,
            format!("Filter {} has been stopped.", html::code_inline(&keyword)),
        )
        .await?;
    } else {
        reply_html(
            bot,
            msg,
            format!("Filter {} was not found.", html::code_inline(&keyword)),
        )
        .await?;
    }
    Ok(())
}

/// Checks a plain group message against the filter table and replies with
/// the first (deterministically chosen) matching payload.
pub async fn filter_reply(bot: &Bot, msg: &Message, db: &Database) -> TgErr<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let filters = get_filters(db, msg.chat.id.0).await?;
    let Some(matched) = first_match(filters.iter().map(|f| f.keyword.as_str()), text) else {
        return Ok(());
    };
    let Some(fl) = filters.iter().find(|f| f.keyword == matched) else {
        return Ok(());
    };
    match fl.kind.parse::<ReplyKind>() {
        Ok(ReplyKind::Text) => {
            reply_to(bot, msg, fl.content.clone()).await?;
        }
        Ok(ReplyKind::Sticker) => {
            bot.send_sticker(msg.chat.id, InputFile::file_id(fl.content.clone()))
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
        }
        Ok(ReplyKind::Photo) => {
            bot.send_photo(msg.chat.id, InputFile::file_id(fl.content.clone()))
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
        }
        Err(e) => {
            log::warn!(
                "filter '{}' in chat {} has a bad kind '{}': {e}",
                fl.keyword,
                fl.chat_id,
                fl.kind
            );
        }
    }
    Ok(())
}
