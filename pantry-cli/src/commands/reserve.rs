//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which claims
//! quantity from an item for the acting user through the atomic
//! reservation protocol.

use clap::Args;
use pantry::{reserve_item, Quantity, ReserveOptions};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, require_user, GlobalOptions};

/// Reserve quantity from an item.
#[derive(Args)]
pub struct ReserveCommand {
    /// Identifier of the item to reserve from
    #[arg(value_name = "ITEM_ID")]
    pub item_id: String,

    /// How much to reserve
    #[arg(long, value_name = "QUANTITY")]
    pub quantity: u32,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let requester = require_user(global)?;
        let config = load_configuration(global)?;

        let quantity = Quantity::try_from(self.quantity)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let mut db = open_database(global, &config)?;
        let options = ReserveOptions::new(requester, self.item_id, quantity);
        let outcome = reserve_item(&mut db, &options).map_err(CliError::from)?;

        // Remaining quantity to stdout (shell-friendly); details to stderr.
        println!("{}", outcome.remaining);
        if !global.quiet {
            if outcome.accrued {
                eprintln!(
                    "Reserved {} more of {} (your total: {}, {} remaining)",
                    self.quantity,
                    outcome.reservation.item_name(),
                    outcome.reservation.quantity(),
                    outcome.remaining
                );
            } else {
                eprintln!(
                    "Reserved {} of {} ({} remaining)",
                    self.quantity,
                    outcome.reservation.item_name(),
                    outcome.remaining
                );
            }
        }

        Ok(())
    }
}
