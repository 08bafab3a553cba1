mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "invsync")]
#[command(about = "Inventory back-office CLI: bulk product import and rack-space updates via CSV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import new products from a catalog CSV export
    Import {
        /// CSV with `brand`, `van`, `seller sku code`, `style id`, `style name`, `mrp` columns
        file: PathBuf,

        /// Show the surviving candidates without uploading anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Bulk-update rack-space labels from a stock CSV export
    RackSpace {
        /// CSV with `Item SkuCode`, `Rack Space`, `InStock` columns
        file: PathBuf,

        /// Show the preview without issuing any updates
        #[arg(long)]
        dry_run: bool,
    },
    /// List products from the remote inventory
    Products {
        /// Style-code search; a 5-character code filters server-side
        #[arg(long)]
        style_code: Option<String>,
    },
    /// List color records
    Colors {
        /// Numeric style-code filter (applied client-side)
        #[arg(long)]
        style_code: Option<String>,
    },
    /// Log in and print the session token for reuse
    Login {
        #[arg(long)]
        username: String,

        #[arg(long, env = "INVSYNC_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Register a user
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "INVSYNC_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out, clearing the server session
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = invsync_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Import { file, dry_run } => {
            commands::import::run_import(&config, &file, dry_run).await
        }
        Commands::RackSpace { file, dry_run } => {
            commands::rack_space::run_rack_space(&config, &file, dry_run).await
        }
        Commands::Products { style_code } => {
            commands::products::run_products(&config, style_code.as_deref()).await
        }
        Commands::Colors { style_code } => {
            commands::products::run_colors(&config, style_code.as_deref()).await
        }
        Commands::Login { username, password } => {
            commands::auth::run_login(&config, username, password).await
        }
        Commands::Register {
            username,
            email,
            password,
        } => commands::auth::run_register(&config, username, email, password).await,
        Commands::Logout => commands::auth::run_logout(&config).await,
    }
}
