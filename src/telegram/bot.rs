//! Bot initialization and command definitions

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "I can:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "how to use the bot")]
    Help,
}

/// Text sent for /start and /help.
pub const WELCOME_TEXT: &str = "Hi! Send me a link.\nI support YouTube (with quality selection) and Instagram.";

/// Creates a Bot instance with a long-upload-friendly HTTP client.
///
/// # Errors
/// Fails fatally when no bot token is configured — the process has nothing
/// to do without one — or when the HTTP client cannot be built.
pub fn create_bot() -> anyhow::Result<Bot> {
    let token = config::BOT_TOKEN.clone();
    if token.is_empty() {
        anyhow::bail!("No bot token configured. Set the BOT_TOKEN (or TELOXIDE_TOKEN) environment variable.");
    }

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    Ok(Bot::with_client(token, client))
}

/// Sets up bot commands in the Telegram UI.
///
/// # Errors
/// Returns `RequestError` if the Bot API rejects the command list.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    use teloxide::types::BotCommand;

    bot.set_my_commands(vec![
        BotCommand::new("start", "show the welcome message"),
        BotCommand::new("help", "how to use the bot"),
    ])
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_descriptions() {
        let commands = Command::descriptions();
        let command_list = format!("{}", commands);

        assert!(command_list.contains("I can"));
        assert!(command_list.contains("start"));
        assert!(command_list.contains("help"));
    }
}
