use std::path::Path;

use chrono::Utc;
use odin::{
    domain::resource::{EquipmentStatus, Kind},
    schedule::{self, Availability},
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Name of the resource to query
    resource: String,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let store = super::load_store(state)?;

        let resource = store
            .resource_named(&self.resource)
            .ok_or_else(|| anyhow::anyhow!("no resource named '{}'", self.resource))?;

        // Equipment under maintenance is unavailable regardless of
        // its calendar.
        if let Kind::Equipment {
            status: EquipmentStatus::Maintenance,
        } = resource.kind()
        {
            println!("{}", "under maintenance".warning());
            return Ok(());
        }

        let key = match resource.kind() {
            Kind::Room => odin::ResourceKey::Room(resource.id()),
            Kind::Equipment { .. } => odin::ResourceKey::Equipment(resource.id()),
            Kind::External => odin::ResourceKey::External,
        };
        let bookings: Vec<_> = store
            .bookings_for(key)
            .into_iter()
            .filter(|b| b.slot().blocks_time())
            .collect();

        match schedule::next_available_window(&bookings, Utc::now()) {
            Availability::Free => println!("{}", "free now".success()),
            Availability::FreeUntil(start) => {
                println!("{} until {start}", "free".success());
            }
            Availability::Occupied { until } => {
                println!("{}, free at {until}", "occupied right now".warning());
            }
        }
        Ok(())
    }
}
