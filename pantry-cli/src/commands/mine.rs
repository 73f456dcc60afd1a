//! Mine command implementation.
//!
//! Shows the acting user's own items, whatever their status.

use clap::Args;

use crate::commands::list::{format_items_as_json, format_items_as_table, OutputFormat};
use crate::error::CliError;
use crate::utils::{load_configuration, open_database, require_user, GlobalOptions};

/// Show your own items.
#[derive(Args)]
pub struct MineCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "PANTRY_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,
}

impl MineCommand {
    /// Execute the mine command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let owner = require_user(global)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let items = db.list_items_by_owner(owner.id()).map_err(CliError::from)?;

        match self.format {
            OutputFormat::Table => format_items_as_table(&items)?,
            OutputFormat::Json => format_items_as_json(&items)?,
        }

        Ok(())
    }
}
