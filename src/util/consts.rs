pub const BOT_NAME: &str = "grpsentry_bot";
