use std::path::Path;

use odin::domain::resource::EquipmentStatus;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Status {
    Available,
    InUse,
    Maintenance,
}

impl From<Status> for EquipmentStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Available => Self::Available,
            Status::InUse => Self::InUse,
            Status::Maintenance => Self::Maintenance,
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Name of the equipment item
    equipment: String,

    /// New status
    #[arg(value_enum)]
    status: Status,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let mut store = super::load_store(state)?;

        let id = store
            .resource_named(&self.equipment)
            .ok_or_else(|| anyhow::anyhow!("no resource named '{}'", self.equipment))?
            .id();
        let status = EquipmentStatus::from(self.status);

        if !store.set_equipment_status(id, status) {
            println!(
                "{}",
                format!("'{}' is not an equipment item", self.equipment).warning()
            );
            return Ok(());
        }

        super::save_store(state, &store)?;
        println!("{} {} is now {status}", "Updated".success(), self.equipment);
        Ok(())
    }
}
