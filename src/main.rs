use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pfind::cli::{self, FilterArgs, Format};
use pfind_core::{config::Config, Datastore};

#[derive(Parser)]
#[command(name = "pfind", about = "Product Finder — browse and filter a product catalog")]
struct Cli {
    /// Write debug logs to /tmp/pfind-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Datastore JSON file. Defaults to `[data] path` in the config, then the
    /// built-in sample.
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Colour theme (`default`, `gruvbox_dark`). Overrides `[ui] theme`.
    #[arg(long)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the (optionally filtered) product table and exit.
    List {
        /// Property name to filter on, e.g. "color".
        #[arg(long)]
        property: Option<String>,
        /// Operator id: equals, greater_than, less_than, any, none, in, contains.
        #[arg(long)]
        operator: Option<String>,
        /// Filter value. For `in`, a comma-separated list.
        #[arg(long)]
        value: Option<String>,
        /// Print rows as JSON instead of an aligned table.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/pfind-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("pfind debug log started — tail -f /tmp/pfind-debug.log");
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "failed to load config, using defaults");
        Config::defaults()
    });
    if let Some(theme) = cli.theme {
        config.ui.theme = theme;
    }

    let store = match cli.data.or_else(|| config.data.datastore_path()) {
        Some(path) => Datastore::from_path(&path)
            .with_context(|| format!("failed to load datastore {}", path.display()))?,
        None => Datastore::sample(),
    };

    match cli.command {
        Some(Command::List {
            property,
            operator,
            value,
            json,
        }) => {
            let args = FilterArgs {
                property,
                operator,
                value,
            };
            let format = if json { Format::Json } else { Format::Table };
            print!("{}", cli::list(&store, &args, format)?);
            if json {
                println!();
            }
            Ok(())
        }
        None => pfind_tui::run(config, store),
    }
}
