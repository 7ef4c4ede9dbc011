use std::path::Path;

use chrono::{DateTime, Utc};
use odin::storage::RecordError;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Name of the tag template to instantiate
    template: String,

    /// Target member name, or the enterprise when omitted
    #[arg(long)]
    member: Option<String>,

    /// When the scored event happened (RFC 3339; defaults to now)
    #[arg(long)]
    on: Option<DateTime<Utc>>,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let mut store = super::load_store(state)?;

        let template = store
            .template_named(&self.template)
            .ok_or_else(|| anyhow::anyhow!("no template named '{}'", self.template))?
            .id();

        let target = match &self.member {
            Some(name) => store
                .target_named(name)
                .ok_or_else(|| anyhow::anyhow!("no member named '{name}'"))?
                .id(),
            None => odin::TargetId::Enterprise,
        };

        let performed = self.on.unwrap_or_else(Utc::now);

        match store.record_tag(template, target, performed) {
            Ok(tag) => {
                super::save_store(state, &store)?;
                println!(
                    "{} {} point(s) to {} (total {})",
                    "Awarded".success(),
                    tag.value(),
                    target,
                    store.live_total(target)
                );
            }
            Err(RecordError::Template(err)) => {
                // Administrator data error: the template needs fixing
                // before this tag can be awarded.
                println!("{}", err.to_string().warning());
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}
