//! Site command handlers.

use tabled::Tabled;
use unicloud_api::Client;
use unicloud_api::models::Site;

use crate::cli::{GlobalOpts, OutputFormat, SitesArgs, SitesCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Host")]
    host_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    desc: String,
    #[tabled(rename = "Timezone")]
    timezone: String,
}

impl From<&Site> for SiteRow {
    fn from(s: &Site) -> Self {
        Self {
            id: s.site_id.clone(),
            host_id: s.host_id.clone().unwrap_or_default(),
            name: s.meta.name.clone().unwrap_or_default(),
            desc: s.meta.desc.clone().unwrap_or_default(),
            timezone: s.meta.timezone.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Client,
    args: SitesArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List => {
            let sites = client.sites().list_typed().await?;
            let out = output::render_list(format, &sites.data, |s| SiteRow::from(s), |s| {
                s.site_id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
