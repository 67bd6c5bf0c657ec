//! efb-chat - inspect chat identities for configured channels

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use efb_chat::config::Config;
use efb_chat::{make_self_chat, make_system_chat, ChatEntity, ChatType};

#[derive(Parser)]
#[command(name = "efb-chat")]
#[command(about = "Inspect chat identities for message forwarding channels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured channels
    Channels,

    /// Build a chat for a channel and print it
    Inspect {
        /// Channel ID (from `channels` output)
        #[arg(long)]
        channel: String,

        /// Chat UID within the channel
        #[arg(long)]
        uid: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        alias: Option<String>,

        /// Chat type: user, group, system
        #[arg(long = "type")]
        chat_type: Option<ChatType>,
    },

    /// Print the self and system chats of a channel
    Sentinels {
        #[arg(long)]
        channel: String,
    },

    /// Check whether two chat identities are the same chat
    Compare {
        #[arg(long)]
        channel: String,
        #[arg(long)]
        uid: String,
        #[arg(long)]
        other_channel: String,
        #[arg(long)]
        other_uid: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Channels => {
            if config.channels.is_empty() {
                println!("No channels configured.");
            }
            for channel in &config.channels {
                println!(
                    "{} {} ({})",
                    channel.channel_emoji, channel.channel_name, channel.channel_id
                );
            }
        }
        Commands::Inspect {
            channel,
            uid,
            name,
            alias,
            chat_type,
        } => {
            let descriptor = config
                .channel(&channel)
                .with_context(|| format!("Channel {:?} is not configured", channel))?;
            let mut chat = ChatEntity::from_channel(descriptor);
            chat.set_chat_uid(uid)?;
            chat.chat_name = name;
            chat.chat_alias = alias;
            chat.chat_type = chat_type;
            println!("{}", chat);
            if let Some(chat_type) = chat.chat_type {
                println!("  type: {}", chat_type);
            }
        }
        Commands::Sentinels { channel } => {
            let descriptor = config
                .channel(&channel)
                .with_context(|| format!("Channel {:?} is not configured", channel))?;
            println!("{}", make_self_chat(descriptor));
            println!("{}", make_system_chat(descriptor));
        }
        Commands::Compare {
            channel,
            uid,
            other_channel,
            other_uid,
        } => {
            let a = chat_for(&config, channel, uid);
            let b = chat_for(&config, other_channel, other_uid);
            let verdict = if a == b { "the same chat" } else { "different chats" };
            println!("{} and {} are {}", a.key(), b.key(), verdict);
        }
    }

    Ok(())
}

/// Chat for an identity, seeded from the channel's descriptor when configured
fn chat_for(config: &Config, channel_id: String, chat_uid: String) -> ChatEntity {
    let mut chat = match config.channel(&channel_id) {
        Some(descriptor) => ChatEntity::from_channel(descriptor),
        None => ChatEntity {
            channel_id: Some(channel_id),
            ..ChatEntity::empty()
        },
    };
    // Unvalidated: comparing against the sentinel UIDs is allowed.
    chat.chat_uid = Some(chat_uid);
    chat
}
