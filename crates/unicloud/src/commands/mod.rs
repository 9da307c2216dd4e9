//! Command dispatch: bridges CLI args -> API accessors -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod fetch;
pub mod hosts;
pub mod sites;

use unicloud_api::Client;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &Client,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match cmd {
        Command::Hosts(args) => hosts::handle(client, args, global, format).await,
        Command::Sites(args) => sites::handle(client, args, global, format).await,
        Command::Devices(args) => devices::handle(client, args, global, format).await,
        Command::Fetch(args) => fetch::handle(client, args, global, format).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
