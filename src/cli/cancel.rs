use std::path::Path;

use tracing::instrument;
use uuid::Uuid;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Id of the booking to cancel
    booking: Uuid,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let mut store = super::load_store(state)?;

        if store.cancel_booking(self.booking) {
            super::save_store(state, &store)?;
            println!("{} booking {}", "Cancelled".success(), self.booking);
            Ok(())
        } else {
            anyhow::bail!("no booking with id {}", self.booking)
        }
    }
}
