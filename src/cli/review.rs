use std::path::Path;

use odin::{RequestStatus, storage::CommitError};
use tracing::instrument;
use uuid::Uuid;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Id of the external request to review
    request: Uuid,

    /// Approve the request
    #[arg(long, conflicts_with = "reject")]
    approve: bool,

    /// Reject the request
    #[arg(long)]
    reject: bool,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let status = match (self.approve, self.reject) {
            (true, false) => RequestStatus::Approved,
            (false, true) => RequestStatus::Rejected,
            _ => anyhow::bail!("pass exactly one of --approve or --reject"),
        };

        let mut store = super::load_store(state)?;

        match store.review_external(self.request, status) {
            Ok(()) => {
                super::save_store(state, &store)?;
                println!("{} request {}", "Reviewed".success(), self.request);
            }
            Err(CommitError::Conflict(conflict)) => {
                // Approval is what makes a request occupy time, so it
                // can collide with an already-approved one.
                println!("{}", conflict.to_string().error());
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}
