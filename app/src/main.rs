#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand, ValueEnum};
use command::{
    AskInput, AskStrategy, CommandStrategy, InitStrategy, RulesStrategy, VersionStrategy,
};
use tracing::warn;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wikibot_config::Config;
use wikibot_core::AnchorSearch;

#[derive(Parser)]
#[command(name = "wikibot")]
#[command(about = "Answer simple questions from Wikipedia infoboxes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask questions interactively, or a single one with -m
    Ask {
        /// Single query to answer
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Where a `%` wildcard stops consuming words
        #[arg(long, value_enum)]
        anchor_search: Option<AnchorArg>,
    },
    /// List the query patterns in priority order
    Rules,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum AnchorArg {
    First,
    Last,
}

impl From<AnchorArg> for AnchorSearch {
    fn from(arg: AnchorArg) -> Self {
        match arg {
            AnchorArg::First => Self::First,
            AnchorArg::Last => Self::Last,
        }
    }
}

fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn resolve_config(loaded: anyhow::Result<Option<Config>>) -> anyhow::Result<Config> {
    Ok(loaded?.unwrap_or_else(|| {
        warn!("No config file found, using defaults. Run 'wikibot init' to create one.");
        Config::default()
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load();
    let log_level = match &loaded {
        Ok(Some(config)) => config.log.level.clone(),
        _ => Config::default().log.level,
    };
    init_tracing(&log_level)?;

    match cli.command {
        Commands::Ask {
            message,
            anchor_search,
        } => {
            let input = AskInput {
                config: resolve_config(loaded)?,
                message,
                anchor_search: anchor_search.map(AnchorSearch::from),
            };
            AskStrategy.execute(input).await?;
        }
        Commands::Rules => {
            RulesStrategy.execute(resolve_config(loaded)?).await?;
        }
        Commands::Init => {
            InitStrategy.execute(()).await?;
        }
        Commands::Version => {
            VersionStrategy.execute(()).await?;
        }
    }

    Ok(())
}
