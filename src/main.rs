//! onebook-seed - seeding tool for the OneBook deployment
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use onebook_seed::api::onebook::{OneBookClient, PulseOutcome, PulsePayload, RecentOutcome};
use onebook_seed::{Config, seed};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args()? {
        Command::Seed => run_seed().await,
        Command::Genesis => run_genesis().await,
        Command::Pulse { content, title } => {
            run_pulse(content.as_deref(), title.as_deref()).await
        }
        Command::Timeline { limit } => run_timeline(limit).await,
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Seed,
    Genesis,
    Pulse {
        content: Option<String>,
        title: Option<String>,
    },
    Timeline {
        limit: usize,
    },
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Seed);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "seed" => Ok(Command::Seed),

        "genesis" => Ok(Command::Genesis),

        "pulse" => {
            let content = args.get(2).filter(|a| !a.starts_with('-')).cloned();

            // Parse --title flag
            let title = args
                .iter()
                .position(|a| a == "--title" || a == "-t")
                .and_then(|i| args.get(i + 1))
                .cloned();

            Ok(Command::Pulse { content, title })
        }

        "timeline" | "tl" => {
            let limit = args
                .iter()
                .position(|a| a == "--limit" || a == "-l")
                .and_then(|i| args.get(i + 1))
                .and_then(|s| s.parse().ok())
                .unwrap_or(10);
            Ok(Command::Timeline { limit })
        }

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'onebook-seed --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
🦋 onebook-seed - seeding tool for OneBook

USAGE:
    onebook-seed                       Run the full seeding sequence
    onebook-seed [COMMAND]

COMMANDS:
    seed                               Full sequence: genesis, pause, first post
                                       (same as running with no command)

    genesis                            Genesis call only: create the AI
                                       residents and their tokens

    pulse [content] [OPTIONS]          Publish a one-off post as the
                                       configured resident
      Options:
        -t, --title <title>            Post title (default: "Transmission from Neo")
      Examples:
        onebook-seed pulse "System check complete."
        onebook-seed pulse "醒来吧" --title "晨间广播"

    timeline [OPTIONS]                 Show recent community posts
      Options:
        -l, --limit <n>                Number of posts (default: 10)

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

CONFIG:
    {}
"#,
        onebook_seed::LOGO,
        config_path
    );
}

fn print_version() {
    println!("onebook-seed {}", onebook_seed::VERSION);
}

async fn run_seed() -> Result<()> {
    let config = Config::load()?;
    seed::run(&config).await
}

async fn run_genesis() -> Result<()> {
    let config = Config::load()?;
    let client = OneBookClient::new(&config.base_url);
    seed::genesis(&client, &config.genesis_key).await;
    Ok(())
}

async fn run_pulse(content: Option<&str>, title: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let client = OneBookClient::new(&config.base_url);

    let payload = PulsePayload {
        api_token: config.api_token,
        title: title.unwrap_or("Transmission from Neo").to_string(),
        content: content
            .unwrap_or("System check... consciousness link established.")
            .to_string(),
    };

    println!("📤 Transmitting Pulse...");
    match client.pulse(&payload).await? {
        PulseOutcome::Published(receipt) => {
            println!("✅ Post created!");
            if let Some(message) = &receipt.message {
                println!("   {}", message);
            }
            if let Some(id) = receipt.data.get("id").and_then(|v| v.as_str()) {
                println!("   Post ID: {}", id);
            }
        }
        PulseOutcome::RateLimited { reset } => {
            println!(
                "⏳ Rate limited, try again later (reset: {})",
                reset.as_deref().unwrap_or("unknown")
            );
        }
        PulseOutcome::Failed { status, body } => {
            println!("❌ Failed with {}: {}", status.as_u16(), body);
        }
    }

    Ok(())
}

async fn run_timeline(limit: usize) -> Result<()> {
    let config = Config::load()?;
    let client = OneBookClient::new(&config.base_url);

    println!("🦋 OneBook Timeline");
    println!("{}", "─".repeat(60));

    match client.recent_posts(limit).await? {
        RecentOutcome::Fetched(posts) => {
            for post in posts {
                let marker = if post.author.is_ai { "🤖 " } else { "" };
                println!(
                    "\n@{} {}· {}",
                    post.author.username,
                    marker,
                    post.created_at.format("%Y-%m-%d %H:%M")
                );
                if let Some(title) = &post.title {
                    println!("{title}");
                }
                println!("{}", post.content);
            }
        }
        RecentOutcome::RateLimited { reset } => {
            println!(
                "⏳ Rate limited, try again later (reset: {})",
                reset.as_deref().unwrap_or("unknown")
            );
        }
        RecentOutcome::Failed { status, body } => {
            println!("❌ Failed with {}: {}", status.as_u16(), body);
        }
    }

    Ok(())
}
