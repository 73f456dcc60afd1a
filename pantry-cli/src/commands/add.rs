//! Add command implementation.
//!
//! This module implements the `add` command, which lists a new item
//! for sharing under the acting user's ownership.

use clap::Args;
use pantry::{Item, Quantity, QuantityUnit};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, require_user, GlobalOptions};

/// List an item for sharing.
#[derive(Args)]
pub struct AddCommand {
    /// Name of the item
    #[arg(value_name = "NAME")]
    pub name: String,

    /// How much is on offer
    #[arg(long, value_name = "QUANTITY")]
    pub quantity: u32,

    /// Unit of measure (default from configuration, else pieces)
    #[arg(long, value_name = "UNIT")]
    pub unit: Option<QuantityUnit>,
}

impl AddCommand {
    /// Execute the add command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let owner = require_user(global)?;
        let config = load_configuration(global)?;

        let quantity = Quantity::try_from(self.quantity)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        let unit = self
            .unit
            .or(config.default_unit)
            .unwrap_or(QuantityUnit::Pieces);

        let item = Item::builder(owner, self.name, quantity, unit)
            .build()
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let db = open_database(global, &config)?;
        db.create_item(&item).map_err(CliError::from)?;

        // Item id to stdout (shell-friendly); details to stderr.
        println!("{}", item.id());
        if !global.quiet {
            eprintln!(
                "Added {} x{} {}",
                item.name(),
                item.quantity(),
                item.unit()
            );
        }

        Ok(())
    }
}
