// Main entry point
use clap::Parser;
use colored::Colorize;
use lingo_relay::application::relay::{ChatEvent, Reply};
use lingo_relay::application::session::ResolutionKind;
use lingo_relay::domain::model::LanguagePair;
use lingo_relay::infrastructure::config::{self, Config, Logging};
use lingo_relay::interfaces::chat::{run_chat, ChatExit};
use lingo_relay::interfaces::cli::{Cli, Command};
use lingo_relay::state::AppState;
use tokio::io::{AsyncReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Command::Config { generate } = &cli.command {
        if *generate {
            let path = config::generate_config_sample(cli.config.as_deref())?;
            println!("Generated config file at: {}", path.display());
        } else {
            match cli.config.clone().or_else(config::get_config_path) {
                Some(path) => println!("{}", path.display()),
                None => eprintln!("{}", "Cannot determine config directory".red()),
            }
        }
        return Ok(());
    }

    let config = config::load_config(cli.config.as_deref())?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    let state = AppState::new(config.clone())?;

    match cli.command {
        Command::Translate {
            mine,
            friend,
            json,
            text,
        } => {
            let pair = LanguagePair::parse(&mine, &friend, &config.supported())?;
            let text = text.join(" ");
            let resolution = state.session.resolve_for_user(&pair, &text).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                let target = resolution
                    .target
                    .as_ref()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let indicator = match resolution.kind {
                    ResolutionKind::Translated => {
                        format!("🌐 [{} → {}]", resolution.detected, target).cyan()
                    }
                    ResolutionKind::SameLanguage => {
                        format!("↺ [{}, unchanged]", resolution.detected).cyan()
                    }
                    ResolutionKind::Fallback => "⚠️  [untranslated]".yellow(),
                };
                eprintln!("{}", indicator);
                println!("{}", resolution.text);
            }
        }
        Command::Detect { text } => {
            let code = state.session.detector().detect(&text.join(" ")).await;
            println!("{}", code);
        }
        Command::Chat { user } => chat_loop(&state, &user).await?,
        Command::Batch { input } => {
            let raw = if input == "-" {
                let mut buf = String::new();
                tokio::io::stdin().read_to_string(&mut buf).await?;
                buf
            } else {
                tokio::fs::read_to_string(&input).await?
            };
            let events: Vec<ChatEvent> = serde_json::from_str(&raw)?;
            let replies = state.relay.handle_batch(&events).await;
            println!("{}", serde_json::to_string_pretty(&replies)?);
        }
        Command::Status => print_status(&state),
        // handled before the config is loaded
        Command::Config { .. } => {}
    }

    Ok(())
}

/// Read stdin line by line until EOF or Ctrl-C
async fn chat_loop(state: &AppState, user: &str) -> anyhow::Result<()> {
    println!(
        "{}",
        "Type a message, /help for commands, Ctrl-D to quit.".green()
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let exit = run_chat(&state.relay, user, stdin, tokio::signal::ctrl_c(), print_reply).await?;
    if exit == ChatExit::Interrupted {
        eprintln!("\nInterrupted, shutting down...");
    }

    Ok(())
}

fn print_reply(reply: &Reply) {
    for message in &reply.messages {
        println!("{} {}", "»".cyan(), message);
    }
    if !reply.quick_replies.is_empty() {
        let hints = reply
            .quick_replies
            .iter()
            .map(|q| format!("{} ({})", q.label, q.text))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {}", hints.dimmed());
    }
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_env("LINGO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_status(state: &AppState) {
    let config: &Config = &state.config;

    println!("{}", "lingo Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!(
        "Providers: {}",
        state.session.cascade().provider_names().join(" → ")
    );
    println!(
        "Detectors: {}",
        state.session.detector().provider_names().join(" → ")
    );
    println!("Pivot: {}", config.pivot());
    println!("Timeout: {}s per call", config.timeout_secs);
    println!("Supported: {}", config.supported().joined());
    println!("Paired users: {}", state.session.pairs().len());
}
