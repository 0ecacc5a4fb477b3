//! Command handlers. Each resource module owns its table rows and detail
//! views; all network work goes through the dashboard's resource clients.

pub mod bots;
pub mod config_cmd;
pub mod jobs;
pub mod lights;
pub mod util;

use switchboard_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a resource command to its handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Bots(args) => bots::handle(dashboard, args, global).await,
        Command::Lights(args) => lights::handle(dashboard, args, global).await,
        Command::Jobs(args) => jobs::handle(dashboard, args, global).await,
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
