use chrono::{NaiveDate, Utc};
use mongodb::Database;
use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::parse_command;
use teloxide::utils::html;

use crate::config::Config;
use crate::database::db_utils::{clear_countdown, get_countdown, set_countdown};
use crate::engine::countdown::{status, validate_target, Countdown, CountdownStatus};
use crate::util::{consts, is_group, require_admin, reply_html, reply_to};
use crate::TgErr;

pub async fn set_countdown_cmd(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    require_admin(bot, cfg, msg).await?;
    let text = msg.text().unwrap_or_default();
    let Some((_, args)) = parse_command(text, consts::BOT_NAME) else {
        return Ok(());
    };
    if args.len() < 2 {
        reply_to(
            bot,
            msg,
            "Usage: /set_countdown DD/MM/YYYY <name of the event>",
        )
        .await?;
        return Ok(());
    }
    let date_str = args[0];
    let name = args[1..].join(" ");
    let target = NaiveDate::parse_from_str(date_str, "%d/%m/%Y")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());
    let Some(target) = target else {
        reply_to(bot, msg, "Invalid date format. Please use DD/MM/YYYY.").await?;
        return Ok(());
    };
    if let Err(e) = validate_target(target, Utc::now()) {
        reply_to(bot, msg, e.to_string()).await?;
        return Ok(());
    }
    let countdown = Countdown {
        name: name.clone(),
        target,
        display: date_str.to_string(),
    };
    // At most one countdown per group; setting a new one overwrites.
    set_countdown(db, msg.chat.id.0, &countdown).await?;
    reply_html(
        bot,
        msg,
        format!(
            "Countdown for <b>{}</b> set to {}. Use /check_countdown to see the remaining time.",
            html::escape(&name),
            html::code_inline(date_str)
        ),
    )
    .await?;
    Ok(())
}

pub async fn check_countdown_cmd(bot: &Bot, msg: &Message, cfg: &Config, db: &Database) -> TgErr<()> {
    is_group(bot, cfg, msg).await?;
    let active = get_countdown(db, msg.chat.id.0).await?;
    match status(active.as_ref(), Utc::now()) {
        CountdownStatus::NoneActive => {
            reply_to(
                bot,
                msg,
                "No active countdown in this chat. Use /set_countdown to start one.",
            )
            .await?;
        }
        CountdownStatus::JustExpired { name } => {
            // One-shot expiry: clear the record while reporting it.
            clear_countdown(db, msg.chat.id.0).await?;
            reply_html(
                bot,
                msg,
                format!(
                    "<b>{}</b> is here! The countdown has finished.",
                    html::escape(&name)
                ),
            )
            .await?;
        }
        CountdownStatus::Remaining {
            name,
            display,
            days,
            hours,
            minutes,
            seconds,
        } => {
            reply_html(
                bot,
                msg,
                format!(
                    "<b>{}</b>\nTarget: {}\n\nTime remaining:\n• {days} days\n• {hours} hours\n• {minutes} minutes\n• {seconds} seconds",
                    html::escape(&name),
                    html::code_inline(&display)
                ),
            )
            .await?;
        }
    }
    Ok(())
}
