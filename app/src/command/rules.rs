use std::io::Write;

use wikibot_config::Config;
use wikibot_core::Dispatcher;

use super::build_dispatcher;

/// Strategy for listing the rule table.
#[derive(Debug, Clone, Copy)]
pub struct RulesStrategy;

impl super::CommandStrategy for RulesStrategy {
    type Input = Config;

    async fn execute(&self, config: Self::Input) -> anyhow::Result<()> {
        let dispatcher = build_dispatcher(&config, None)?;
        write_rules(&dispatcher, &mut std::io::stdout().lock())
    }
}

fn write_rules<W: Write>(dispatcher: &Dispatcher, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "anchor search: {}", dispatcher.anchor_search())?;
    for (i, rule) in dispatcher.rules().enumerate() {
        // Pattern's Display ignores width, so pad the rendered string.
        let pattern = rule.pattern().to_string();
        writeln!(out, "{:>2}. {pattern:<32} -> {}", i + 1, rule.action().name())?;
    }
    Ok(())
}
