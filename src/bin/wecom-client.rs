use std::path::Path;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use wecom_client::client::types::{MsgType, OutgoingMessage};
use wecom_client::config::{loader, validator};
use wecom_client::utils::logging::{self, LogLevel};
use wecom_client::WecomClient;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "wecom-client.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check WeCom connectivity
    Status,
    /// Send a quick message to a user, party or tag
    Send {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        party: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        /// Send the content as markdown instead of plain text
        #[arg(long)]
        markdown: bool,
        /// Mark the message confidential regardless of the configured default
        #[arg(long)]
        safe: bool,
        content: String,
    },
    /// Fetch a user profile from the directory
    Profile { user_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args and YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = loader::file_to_config(Path::new(&args.config))?;

    // -------------------------------
    // 2. Init logging
    // -------------------------------

    logging::run(&service_config, args.log_level)?;

    // -------------------------------
    // 3. Validate config, build client
    // -------------------------------

    let client_config = validator::validate_client_config(&service_config.client).await?;
    let client = WecomClient::new(client_config)?;

    // -------------------------------
    // 4. Dispatch command
    // -------------------------------

    match args.command {
        Command::Status => {
            let result = client.probe_connectivity().await?;
            let mut message = "WeCom API reachable.".to_owned();
            if !result.ip_list.is_empty() {
                message.push_str(&format!(" IPs: {}", result.ip_list.join(", ")));
            }
            println!("{}", message);
        }
        Command::Send {
            user,
            party,
            tag,
            markdown,
            safe,
            content,
        } => {
            if content.trim().is_empty() {
                return Err(anyhow!("Message content cannot be empty."));
            }
            let message = OutgoingMessage {
                to_user: user,
                to_party: party,
                to_tag: tag,
                content,
                msg_type: if markdown { MsgType::Markdown } else { MsgType::Text },
                safe: if safe { Some(true) } else { None },
            };
            let receipt = client.send_message(&message).await?;
            let invalid = receipt
                .invalid_user
                .as_deref()
                .or(receipt.invalid_party.as_deref())
                .or(receipt.invalid_tag.as_deref());
            match invalid {
                Some(target) => println!("Sent with warning: invalid target {}", target),
                None => println!("Message sent successfully."),
            }
        }
        Command::Profile { user_id } => {
            let profile = client.get_user_profile(&user_id).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }

    Ok(())
}
