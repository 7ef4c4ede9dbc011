use std::path::Path;

use chrono::{DateTime, Utc};
use odin::{Interval, storage::CommitError};
use tracing::instrument;
use uuid::Uuid;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Id of the booking to move
    booking: Uuid,

    /// New start (RFC 3339)
    #[arg(long)]
    from: DateTime<Utc>,

    /// New end (RFC 3339)
    #[arg(long)]
    to: DateTime<Utc>,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let mut store = super::load_store(state)?;

        let interval = match Interval::new(self.from, self.to) {
            Ok(interval) => interval,
            Err(err) => {
                println!("{}", err.to_string().error());
                return Ok(());
            }
        };

        let key = store
            .booking(self.booking)
            .map(|b| b.slot().key())
            .ok_or_else(|| anyhow::anyhow!("no booking with id {}", self.booking))?;
        let revision = store.booking_revision(key);

        match store.reschedule_booking(self.booking, interval, revision) {
            Ok(()) => {
                super::save_store(state, &store)?;
                println!("{} booking {} to {interval}", "Moved".success(), self.booking);
            }
            Err(CommitError::Conflict(conflict)) => {
                println!("{}", conflict.to_string().error());
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}
