//! Command implementations for the pantry CLI.

mod add;
mod cancel;
mod init;
mod list;
mod mine;
mod remove;
mod reservations;
mod reserve;

pub use add::AddCommand;
pub use cancel::CancelCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use mine::MineCommand;
pub use remove::RemoveCommand;
pub use reservations::ReservationsCommand;
pub use reserve::ReserveCommand;
