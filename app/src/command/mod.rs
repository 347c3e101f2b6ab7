//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use std::sync::Arc;

use tracing::info;
use wikibot_config::Config;
use wikibot_core::{AnchorSearch, Dispatcher, Matcher};
use wikibot_tools::{PageSource, WikiClient, default_rules};

mod ask;
mod init;
mod rules;
mod version;

pub use ask::{AskInput, AskStrategy};
pub use init::InitStrategy;
pub use rules::RulesStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Build the dispatcher over live Wikipedia from configuration.
fn build_dispatcher(
    config: &Config,
    anchor_override: Option<AnchorSearch>,
) -> anyhow::Result<Dispatcher> {
    let anchor_search = anchor_override.unwrap_or(config.matching.anchor_search);
    info!(
        "Using wiki API {} (auto_suggest={}, anchor_search={anchor_search})",
        config.wiki.api_url, config.wiki.auto_suggest
    );

    let pages: Arc<dyn PageSource> = Arc::new(WikiClient::new(config.wiki.clone())?);
    let table = default_rules(&pages)?;

    Ok(Dispatcher::new(table).with_matcher(Matcher::new(anchor_search)))
}
