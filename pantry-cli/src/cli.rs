//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive
//! macros, including global options and subcommands.

use crate::commands::{
    AddCommand, CancelCommand, InitCommand, ListCommand, MineCommand, RemoveCommand,
    ReservationsCommand, ReserveCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for sharing surplus food items.
#[derive(Parser)]
#[command(name = "pantry")]
#[command(version, about = "Share surplus food items and reserve from them", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PANTRY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Identifier of the acting user
    #[arg(long, value_name = "USER", global = true, env = "PANTRY_USER")]
    pub user: Option<String>,

    /// Display name of the acting user (defaults to the identifier)
    #[arg(long, value_name = "NAME", global = true, env = "PANTRY_USER_NAME")]
    pub user_name: Option<String>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "PANTRY_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "PANTRY_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// List an item for sharing
    Add(AddCommand),

    /// Show items available for reservation
    List(ListCommand),

    /// Show your own items
    Mine(MineCommand),

    /// Remove one of your items
    Remove(RemoveCommand),

    /// Reserve quantity from an item
    Reserve(ReserveCommand),

    /// Cancel a reservation and return its quantity
    Cancel(CancelCommand),

    /// Show your reservations
    Reservations(ReservationsCommand),
}
