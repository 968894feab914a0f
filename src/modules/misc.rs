use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::html;

use crate::util::{reply_html, sender, target_user};
use crate::TgErr;

/// Shows the id of the sender, or of the replied-to user, plus the chat id.
pub async fn get_id(bot: &Bot, msg: &Message) -> TgErr<()> {
    let user = match target_user(msg) {
        Some(u) => u,
        None => sender(msg)?,
    };
    reply_html(
        bot,
        msg,
        format!(
            "The Telegram user id for <b>{}</b> is {}\nChat id: {}",
            html::escape(&user.full_name()),
            html::code_inline(&user.id.to_string()),
            html::code_inline(&msg.chat.id.to_string()),
        ),
    )
    .await?;
    Ok(())
}
