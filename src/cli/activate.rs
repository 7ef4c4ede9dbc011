use std::path::Path;

use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Name of the scoring period to activate
    period: String,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let mut store = super::load_store(state)?;

        let period = store
            .period_named(&self.period)
            .ok_or_else(|| anyhow::anyhow!("no scoring period named '{}'", self.period))?
            .id();

        let previous = store.activate_period(period)?;
        super::save_store(state, &store)?;

        match previous {
            Some(old) if old != period => {
                println!(
                    "{} period '{}' (deactivated {old})",
                    "Activated".success(),
                    self.period
                );
            }
            _ => println!("{} period '{}'", "Activated".success(), self.period),
        }
        Ok(())
    }
}
