//! Init command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Initialize the data directory and database.
#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Opening the database creates the data directory and schema as
    /// a side effect; this command only makes that step explicit.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        if !global.quiet {
            let version = pantry::database::get_schema_version(db.connection())
                .map_err(CliError::from)?;
            eprintln!("Initialized database (schema version {version})");
        }

        Ok(())
    }
}
