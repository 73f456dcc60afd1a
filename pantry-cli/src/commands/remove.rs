//! Remove command implementation.
//!
//! This module implements the `remove` command, which withdraws one
//! of the acting user's items. Outstanding reservations against the
//! item become orphaned; their holders can still cancel them.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, require_user, GlobalOptions};

/// Remove one of your items.
#[derive(Args)]
pub struct RemoveCommand {
    /// Identifier of the item to remove
    #[arg(value_name = "ITEM_ID")]
    pub item_id: String,
}

impl RemoveCommand {
    /// Execute the remove command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let user = require_user(global)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let item = db
            .get_item(&self.item_id)
            .map_err(CliError::from)?
            .ok_or_else(|| {
                CliError::SemanticFailure(format!("item not found: {}", self.item_id))
            })?;

        if item.owner().id() != user.id() {
            return Err(CliError::SemanticFailure(format!(
                "item {} belongs to {}",
                self.item_id,
                item.owner().display_name()
            )));
        }

        let outstanding = db
            .list_reservations_for_item(&self.item_id)
            .map_err(CliError::from)?;

        db.delete_item(&self.item_id).map_err(CliError::from)?;

        if !global.quiet {
            eprintln!("Removed {}", item.name());
            if !outstanding.is_empty() {
                eprintln!(
                    "Warning: {} outstanding reservation(s) are now orphaned",
                    outstanding.len()
                );
            }
        }

        Ok(())
    }
}
