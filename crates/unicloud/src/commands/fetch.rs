//! `fetch <service> [id]`: resolve an accessor by family name and print
//! the untyped response.

use unicloud_api::Client;

use crate::cli::{FetchArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &Client,
    args: FetchArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let service = client.service(&args.service)?;
    tracing::debug!(service = %service.name(), id = ?args.id, "fetching");

    let body = match args.id {
        Some(ref id) => service.get(id).await?,
        None => service.list().await?,
    };

    output::print_output(&output::render_value(format, &body), global.quiet);
    Ok(())
}
