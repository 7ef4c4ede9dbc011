use std::path::Path;

use chrono::Utc;
use non_empty_string::NonEmptyString;
use odin::{MemoryStore, Target};
use tracing::instrument;

use super::Preferences;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Display name of the enterprise pseudo-member
    #[arg(long, default_value = "Empresa")]
    enterprise: String,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        if state.exists() {
            anyhow::bail!("workspace already initialized ({} exists)", state.display());
        }

        let name = NonEmptyString::new(self.enterprise)
            .map_err(|_| anyhow::anyhow!("enterprise name must not be empty"))?;

        let mut store = MemoryStore::default();
        store.add_target(Target::enterprise(name, Utc::now()));
        super::save_store(state, &store)?;

        let preferences = Preferences {
            state: state.to_path_buf(),
        };
        preferences.save()?;

        println!("Initialized workspace in {}", state.display());
        println!("  Created: {}", state.display());
        println!("  Created: {}", Preferences::FILE);
        println!();
        println!("Next steps:");
        println!("  odin add room \"Sala 1\"");
        println!("  odin add member \"Alice\"");

        Ok(())
    }
}
