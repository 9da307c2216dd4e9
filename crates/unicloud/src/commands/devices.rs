//! Device command handlers.

use chrono::DateTime;
use serde::Serialize;
use tabled::Tabled;
use unicloud_api::models::{Device, HostDevices};
use unicloud_api::{Client, DeviceFilter};

use crate::cli::{DevicesArgs, DevicesCommand, DevicesListArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Flattened entry ─────────────────────────────────────────────────

/// One device tagged with the host it was reported under.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceEntry<'a> {
    host_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    host_name: Option<&'a str>,
    #[serde(flatten)]
    device: &'a Device,
}

fn flatten(groups: &[HostDevices]) -> Vec<DeviceEntry<'_>> {
    groups
        .iter()
        .flat_map(|group| {
            group.devices.iter().map(move |device| DeviceEntry {
                host_id: &group.host_id,
                host_name: group.host_name.as_deref(),
                device,
            })
        })
        .collect()
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Version")]
    version: String,
}

impl From<&DeviceEntry<'_>> for DeviceRow {
    fn from(e: &DeviceEntry<'_>) -> Self {
        let d = e.device;
        Self {
            host: e.host_name.unwrap_or(e.host_id).to_owned(),
            name: d.name.clone().unwrap_or_default(),
            model: d.model.clone().unwrap_or_default(),
            mac: d.mac.clone().unwrap_or_default(),
            ip: d.ip.clone().unwrap_or_default(),
            status: d.status.clone().unwrap_or_default(),
            version: d.version.clone().unwrap_or_default(),
        }
    }
}

// ── Argument handling ───────────────────────────────────────────────

/// Build the request filter, rejecting times that aren't RFC 3339.
fn filter_from_args(args: DevicesListArgs) -> Result<DeviceFilter, CliError> {
    let mut filter = DeviceFilter::new().host_ids(args.host_ids);
    if let Some(time) = args.time.filter(|t| !t.is_empty()) {
        DateTime::parse_from_rfc3339(&time).map_err(|e| CliError::Validation {
            field: "time".into(),
            reason: format!("expected an RFC 3339 timestamp ({e})"),
        })?;
        filter = filter.time(time);
    }
    Ok(filter)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Client,
    args: DevicesArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List(list) => {
            let filter = filter_from_args(list)?;
            let groups = client.devices().list_typed(&filter).await?;
            let entries = flatten(&groups.data);
            let out = output::render_list(format, &entries, |e| DeviceRow::from(e), |e| {
                e.device.id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
