//! Reservations command implementation.
//!
//! Shows the acting user's reservations, including orphaned ones
//! whose item has since been removed.

use std::io::Write;

use clap::Args;
use pantry::Reservation;

use crate::commands::list::OutputFormat;
use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, require_user, GlobalOptions};

/// Show your reservations.
#[derive(Args)]
pub struct ReservationsCommand {
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

impl ReservationsCommand {
    /// Execute the reservations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let user = require_user(global)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let reservations = db
            .list_reservations_for_user(user.id())
            .map_err(CliError::from)?;

        match self.format {
            OutputFormat::Table => format_as_table(&db, &reservations)?,
            OutputFormat::Json => format_as_json(&db, &reservations)?,
        }

        Ok(())
    }
}

/// Whether the reservation's item still exists.
fn is_orphaned(db: &pantry::Database, reservation: &Reservation) -> Result<bool, CliError> {
    Ok(db.get_item(reservation.item_id()).map_err(CliError::from)?.is_none())
}

/// Format reservations as a human-readable table.
fn format_as_table(
    db: &pantry::Database,
    reservations: &[Reservation],
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "ITEM_ID\tITEM\tQUANTITY\tUNIT\tUPDATED_AT\tNOTE")?;
    for res in reservations {
        let note = if is_orphaned(db, res)? { "orphaned" } else { "-" };
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            res.item_id(),
            res.item_name(),
            res.quantity(),
            res.unit(),
            format_timestamp(res.updated_at()),
            note,
        )?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(db: &pantry::Database, reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let mut json_data = Vec::with_capacity(reservations.len());
    for res in reservations {
        json_data.push(serde_json::json!({
            "item_id": res.item_id(),
            "item_name": res.item_name(),
            "quantity": res.quantity(),
            "unit": res.unit(),
            "created_at": format_timestamp(res.created_at()),
            "updated_at": format_timestamp(res.updated_at()),
            "orphaned": is_orphaned(db, res)?,
        }));
    }

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    writeln!(handle)?;

    Ok(())
}
