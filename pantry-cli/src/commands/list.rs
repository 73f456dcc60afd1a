//! List command implementation.
//!
//! This module implements the `list` command, which displays items
//! available for reservation in table or JSON format.

use std::io::Write;

use clap::{Args, ValueEnum};
use pantry::Item;

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, GlobalOptions};

/// Output format for listing commands.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}

/// Show items available for reservation.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "PANTRY_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Filter by owner
    #[arg(long, value_name = "USER")]
    pub filter_owner: Option<String>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let mut items = db.list_available_items().map_err(CliError::from)?;
        if let Some(ref owner) = self.filter_owner {
            items.retain(|item| item.owner().id() == owner);
        }

        match self.format {
            OutputFormat::Table => format_items_as_table(&items)?,
            OutputFormat::Json => format_items_as_json(&items)?,
        }

        Ok(())
    }
}

/// Format items as a human-readable table.
pub fn format_items_as_table(items: &[Item]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "ID\tNAME\tQUANTITY\tUNIT\tSTATUS\tOWNER\tCREATED_AT")?;
    for item in items {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            item.id(),
            item.name(),
            item.quantity(),
            item.unit(),
            item.status(),
            item.owner().display_name(),
            format_timestamp(item.created_at()),
        )?;
    }

    Ok(())
}

/// Format items as JSON.
pub fn format_items_as_json(items: &[Item]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = items
        .iter()
        .map(|item| {
            serde_json::json!({
                "id": item.id(),
                "name": item.name(),
                "quantity": item.quantity(),
                "unit": item.unit(),
                "status": item.status(),
                "owner": item.owner().id(),
                "owner_name": item.owner().display_name(),
                "created_at": format_timestamp(item.created_at()),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    writeln!(handle)?;

    Ok(())
}
