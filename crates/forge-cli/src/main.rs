//! Forge CLI - send owner notifications and inspect session cookie policy

mod commands;

use clap::{Parser, Subcommand};
use commands::{CookieOptionsCommand, NotifyCommand};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "FORGE_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "FORGE_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a notification to the project owner
    Notify(NotifyCommand),
    /// Print the session cookie attributes for a request
    CookieOptions(CookieOptionsCommand),
}

fn build_filter(log_level: &str) -> anyhow::Result<tracing_subscriber::EnvFilter> {
    // If RUST_LOG is set, use it directly; otherwise use our default filter
    if std::env::var("RUST_LOG").is_ok() {
        return tracing_subscriber::EnvFilter::try_from_default_env()
            .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG environment variable: {}", e));
    }

    // Forge crates at the requested level, noisy dependencies at warn
    tracing_subscriber::EnvFilter::try_new(format!(
        "forge={level},\
         forge_core={level},\
         forge_auth={level},\
         forge_notifications={level},\
         h2=warn,\
         hyper=warn,\
         hyper_util=warn,\
         reqwest=warn,\
         rustls=warn",
        level = log_level
    ))
    .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", log_level, e))
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let filter = build_filter(&cli.log_level)?;

    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
        _ => tracing_subscriber::fmt::layer() // "compact" or any other value
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global default subscriber: {}", e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    match cli.command {
        Commands::Notify(notify_cmd) => notify_cmd.execute(),
        Commands::CookieOptions(cookie_cmd) => cookie_cmd.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notify_command() {
        let cli = Cli::try_parse_from([
            "forge",
            "--log-level",
            "debug",
            "notify",
            "--title",
            "Deploy finished",
            "--content",
            "All green",
            "--forge-api-url",
            "https://forge.example.com",
            "--forge-api-key",
            "test-key",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Notify(cmd) => {
                assert_eq!(cmd.title, "Deploy finished");
                assert_eq!(cmd.forge_api_url, "https://forge.example.com");
            }
            _ => panic!("Expected notify command"),
        }
    }

    #[test]
    fn test_parse_cookie_options_command() {
        let cli = Cli::try_parse_from([
            "forge",
            "cookie-options",
            "--forwarded-proto",
            "http",
            "--forwarded-proto",
            "https",
        ])
        .unwrap();

        match cli.command {
            Commands::CookieOptions(cmd) => {
                assert_eq!(cmd.protocol, "http");
                assert_eq!(cmd.forwarded_proto, vec!["http", "https"]);
            }
            _ => panic!("Expected cookie-options command"),
        }
    }

    #[test]
    fn test_notify_requires_title() {
        assert!(Cli::try_parse_from(["forge", "notify", "--content", "x"]).is_err());
    }

    #[test]
    fn test_build_filter_accepts_levels() {
        if std::env::var("RUST_LOG").is_err() {
            assert!(build_filter("debug").is_ok());
        }
    }
}
