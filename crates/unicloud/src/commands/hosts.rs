//! Host command handlers.

use tabled::Tabled;
use unicloud_api::Client;
use unicloud_api::models::Host;

use crate::cli::{GlobalOpts, HostsArgs, HostsCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct HostRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    host_type: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Owner")]
    owner: String,
}

impl From<&Host> for HostRow {
    fn from(h: &Host) -> Self {
        Self {
            id: h.id.clone(),
            name: h.display_name().unwrap_or_default().to_owned(),
            host_type: h.host_type.clone().unwrap_or_default(),
            ip: h.ip_address.clone().unwrap_or_default(),
            owner: if h.owner { "yes".into() } else { String::new() },
        }
    }
}

fn detail(h: &Host) -> String {
    output::detail_lines(&[
        ("ID", Some(h.id.clone())),
        ("Name", h.display_name().map(str::to_owned)),
        ("Type", h.host_type.clone()),
        ("Hardware ID", h.hardware_id.clone()),
        ("IP", h.ip_address.clone()),
        ("Owner", Some(h.owner.to_string())),
        ("Blocked", Some(h.is_blocked.to_string())),
        ("Registered", h.registration_time.clone()),
        ("Last state change", h.last_connection_state_change.clone()),
        ("Latest backup", h.latest_backup_time.clone()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Client,
    args: HostsArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match args.command {
        HostsCommand::List => {
            let hosts = client.hosts().list_typed().await?;
            let out =
                output::render_list(format, &hosts.data, |h| HostRow::from(h), |h| h.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        HostsCommand::Get { id } => {
            let host = client.hosts().get_typed(&id).await?;
            let out = output::render_single(format, &host.data, detail, |h| h.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
