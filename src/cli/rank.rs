use std::path::Path;

use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser, Default)]
pub struct Command {
    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let store = super::load_store(state)?;
        let ranking = store.ranking();

        if ranking.is_empty() {
            println!("No targets registered yet. Create one with 'odin add member'.");
            return Ok(());
        }

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            }
            OutputFormat::Table => {
                for (position, standing) in ranking.iter().enumerate() {
                    let row = format!(
                        "{:>3}. {:<24} {:>6}",
                        position + 1,
                        standing.name,
                        standing.total
                    );
                    if position == 0 {
                        println!("{}", row.success());
                    } else {
                        println!("{row}");
                    }
                }
            }
        }
        Ok(())
    }
}
