use clap::{Parser, Subcommand};

/// secrets-bootstrap — load the startup secret from HCP Vault Secrets
#[derive(Parser)]
#[command(name = "secrets-bootstrap", version, about)]
pub struct Cli {
    /// Vault Secrets app to open (overrides HCP_APP_NAME from `.env`)
    #[arg(long, global = true, env = "HCP_APP_NAME")]
    pub app: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the startup hook and report what was stored
    Check {
        /// Print a loaded secret in full instead of masking it
        #[arg(long)]
        reveal: bool,
    },

    /// Print the endpoint the startup hook would call, without calling it
    Url,
}
