use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use secrets_bootstrap::config;
use secrets_bootstrap::secrets::{self, SecretValue};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load `.env` first so RUST_LOG and clap's `env = "..."` args can see it.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "secrets_bootstrap=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::Cli::parse();

    let mut cfg = config::from_env();
    if let Some(app) = args.app {
        cfg.app_name = app;
    }

    match args.command.unwrap_or(cli::Commands::Check { reveal: false }) {
        cli::Commands::Check { reveal } => {
            let registered = secrets::register_with(&cfg).await;
            report(&registered.api_key, reveal);
        }
        cli::Commands::Url => {
            println!("{}", cfg.open_url());
        }
    }

    Ok(())
}

fn report(value: &SecretValue, reveal: bool) {
    match value {
        SecretValue::Loaded(secret) if reveal => println!("loaded: {}", secret),
        SecretValue::Loaded(secret) => println!("loaded: {}", mask(secret)),
        SecretValue::Placeholder(msg) => println!("not loaded: {}", msg),
    }
}

/// Keep only the last four characters visible.
fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
