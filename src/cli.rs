use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vidra")]
#[command(author, version, about = "Telegram bot that fetches video and audio from media links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Print the title and available stream heights for a URL
    Probe {
        /// Media URL to probe
        url: String,

        /// Print the probe result as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
