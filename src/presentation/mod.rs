// Presentation state holders
// Own observable UI state and drive the team repository

pub mod list;
pub mod register;
mod state;

pub use list::{ListState, TeamListModel};
pub use register::{RegisterModel, RegisterState};

/// Shown when a failure carries no message of its own
pub const UNKNOWN_ERROR: &str = "unknown error";
