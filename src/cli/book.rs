use std::path::Path;

use chrono::{DateTime, Utc};
use odin::{
    Booking, Interval, RequestStatus, Slot, TargetId,
    domain::resource::Kind,
    storage::CommitError,
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Name of the resource to book
    resource: String,

    /// Member making the booking
    #[arg(long)]
    member: String,

    /// Start of the slot (RFC 3339)
    #[arg(long)]
    from: DateTime<Utc>,

    /// End of the slot (RFC 3339)
    #[arg(long)]
    to: DateTime<Utc>,

    /// Title shown on the calendar
    #[arg(long, default_value = "Reserva")]
    title: String,
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

        let resource = store
            .resource_named(&self.resource)
            .ok_or_else(|| anyhow::anyhow!("no resource named '{}'", self.resource))?;
        let slot = match resource.kind() {
            Kind::Room => Slot::Room {
                room: resource.id(),
            },
            Kind::Equipment { .. } => Slot::Equipment {
                item: resource.id(),
            },
            // External rooms are requested, not booked outright; they
            // start pending and only occupy time once approved.
            Kind::External => Slot::External {
                status: RequestStatus::Pending,
            },
        };

        let member = store
            .target_named(&self.member)
            .ok_or_else(|| anyhow::anyhow!("no member named '{}'", self.member))?;
        let TargetId::Member(member_id) = member.id() else {
            anyhow::bail!("bookings belong to members, not the enterprise");
        };

        let external = matches!(slot, Slot::External { .. });
        let booking = Booking::new(slot, member_id, interval, self.title);
        let revision = store.booking_revision(booking.slot().key());

        match store.commit_booking(booking, revision) {
            Ok(id) => {
                super::save_store(state, &store)?;
                if external {
                    println!("{} request {id} ({interval})", "Submitted".success());
                } else {
                    println!("{} booking {id} ({interval})", "Committed".success());
                }
            }
            Err(CommitError::Conflict(conflict)) => {
                println!("{}", conflict.to_string().error());
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}
