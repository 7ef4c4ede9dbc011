use std::path::Path;

use chrono::Utc;
use odin::storage::CloseError;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Name of the semester to close
    semester: String,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let mut store = super::load_store(state)?;

        let semester = store
            .semester_named(&self.semester)
            .ok_or_else(|| anyhow::anyhow!("no semester named '{}'", self.semester))?
            .id();

        match store.close_semester(semester, Utc::now()) {
            Ok(snapshots) => {
                super::save_store(state, &store)?;
                println!(
                    "{} semester '{}': {} snapshot(s) taken, totals reset",
                    "Closed".success(),
                    self.semester,
                    snapshots.len()
                );
            }
            Err(CloseError::Partial(partial)) => {
                // The written snapshots are kept; only their targets
                // were reset. Needs administrator attention.
                super::save_store(state, &store)?;
                println!("{}", partial.to_string().warning());
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}
