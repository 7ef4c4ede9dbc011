use std::path::Path;

use chrono::{NaiveDate, Utc};
use odin::schedule;
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Day to show (YYYY-MM-DD; defaults to today)
    day: Option<NaiveDate>,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let store = super::load_store(state)?;
        let day = self.day.unwrap_or_else(|| Utc::now().date_naive());

        let resources: Vec<_> = store.resources().cloned().collect();
        let view = schedule::daily_occupancy(&resources, store.bookings(), day);

        if view.is_empty() {
            println!("No resources registered yet. Create one with 'odin add room'.");
            return Ok(());
        }

        println!("{day}");
        for occupancy in view {
            let header = format!("{} [{}]", occupancy.name, occupancy.kind);
            println!("{}", header.kind(occupancy.kind));

            if occupancy.slots.is_empty() {
                println!("  {}", "free all day".dim());
                continue;
            }
            for slot in occupancy.slots {
                let times = if is_narrow() {
                    format!(
                        "{}-{}",
                        slot.interval.start().format("%H:%M"),
                        slot.interval.end().format("%H:%M")
                    )
                } else {
                    format!(
                        "{} .. {}",
                        slot.interval.start().format("%H:%M"),
                        slot.interval.end().format("%H:%M")
                    )
                };
                println!("  {times}  {}", slot.title);
            }
        }
        Ok(())
    }
}
