use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "Greets you and registers the chat")]
    Start,
    #[command(description = "Shows this help")]
    Help,
    #[command(description = "Shows your id, or the id of a replied user")]
    Id,
    #[command(description = "Warns a user, bans at 3 warnings")]
    Warn,
    #[command(description = "Removes one warning from a user")]
    Removewarn,
    #[command(description = "Shows a user's warning count")]
    Warns,
    #[command(description = "Bans a user")]
    Ban,
    #[command(description = "Unbans a user by id")]
    Unban,
    #[command(description = "Mutes a user, optionally for N minutes")]
    Mute,
    #[command(description = "Unmutes a user")]
    Unmute,
    #[command(description = "Promotes a user to admin")]
    Promote,
    #[command(description = "Locks a feature: all, text, stickers, media, images, audio")]
    Lock,
    #[command(description = "Unlocks a locked feature")]
    Unlock,
    #[command(description = "Saves a keyword filter from a replied message")]
    Filter,
    #[command(description = "Stops a keyword filter")]
    Stop,
    #[command(rename = "ban_word", description = "Bans a word; matching messages get deleted")]
    BanWord,
    #[command(rename = "unban_word", description = "Unbans a word")]
    UnbanWord,
    #[command(rename = "set_countdown", description = "Sets a countdown: DD/MM/YYYY <name>")]
    SetCountdown,
    #[command(rename = "check_countdown", description = "Shows the remaining countdown time")]
    CheckCountdown,
    #[command(description = "Broadcasts a message to all tracked chats (owner only)")]
    Broadcast,
}
