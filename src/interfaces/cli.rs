use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Bidirectional chat translation relay.")]
#[command(version)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate one message for a language pair
    Translate {
        /// Your language
        #[arg(short = 'm', long)]
        mine: String,

        /// Your friend's language
        #[arg(short = 'f', long)]
        friend: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Message text
        #[arg(num_args = 1.., required = true)]
        text: Vec<String>,
    },

    /// Detect the language of a text
    Detect {
        #[arg(num_args = 1.., required = true)]
        text: Vec<String>,
    },

    /// Chat interactively; every line is handled like an inbound message
    Chat {
        /// User id to chat as
        #[arg(short = 'u', long, default_value = "local")]
        user: String,
    },

    /// Handle a JSON array of chat events and print the replies as JSON
    Batch {
        /// Events file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },

    /// Show configured providers and settings
    Status,

    /// Manage the configuration file
    Config {
        /// Generate config sample
        #[arg(long)]
        generate: bool,
    },
}
