//! Cancel command implementation.
//!
//! This module implements the `cancel` command, which releases the
//! acting user's reservation on an item and returns the quantity.

use clap::Args;
use pantry::{cancel_reservation, CancelOutcome, ReservationKey};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, require_user, GlobalOptions};

/// Cancel a reservation and return its quantity.
#[derive(Args)]
pub struct CancelCommand {
    /// Identifier of the reserved item
    #[arg(value_name = "ITEM_ID")]
    pub item_id: String,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let user = require_user(global)?;
        let config = load_configuration(global)?;

        let key = ReservationKey::new(self.item_id, user.id())
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let mut db = open_database(global, &config)?;
        let outcome = cancel_reservation(&mut db, &key).map_err(CliError::from)?;

        if !global.quiet {
            match outcome {
                CancelOutcome::Restored { quantity } => {
                    eprintln!("Cancelled reservation, {quantity} returned");
                }
                CancelOutcome::Orphaned => {
                    eprintln!("Cancelled reservation; the item no longer exists");
                }
            }
        }

        Ok(())
    }
}
