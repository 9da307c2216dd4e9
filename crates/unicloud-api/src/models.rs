// Typed views of Site Manager responses.
//
// The API wraps every payload as `{ "data": ..., "httpStatusCode": 200,
// "traceId": "..." }`. Only the commonly used fields are typed; everything
// else lands in the flattened `extra` map so nothing is lost when the
// models are re-serialized.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Standard response envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub http_status_code: Option<u16>,
    #[serde(default)]
    pub trace_id: Option<String>,
}

/// A console (UniFi OS host) registered to the account.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: String,
    #[serde(default)]
    pub hardware_id: Option<String>,
    #[serde(default, rename = "type")]
    pub host_type: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub owner: bool,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub registration_time: Option<String>,
    #[serde(default)]
    pub last_connection_state_change: Option<String>,
    #[serde(default)]
    pub latest_backup_time: Option<String>,
    #[serde(default)]
    pub reported_state: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Host {
    /// Human-facing name from the reported state, when the host published one.
    pub fn display_name(&self) -> Option<&str> {
        let state = self.reported_state.as_ref()?;
        state
            .get("name")
            .or_else(|| state.get("hostname"))
            .and_then(Value::as_str)
    }
}

/// Site metadata block.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub gateway_mac: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A network site managed through one of the account's hosts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub site_id: String,
    #[serde(default)]
    pub host_id: Option<String>,
    #[serde(default)]
    pub meta: SiteMeta,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub statistics: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The devices behind one host, as grouped by `GET /ea/devices`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostDevices {
    pub host_id: String,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One UniFi device (gateway, switch, AP, camera, ...).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub product_line: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub firmware_status: Option<String>,
    #[serde(default)]
    pub is_console: bool,
    #[serde(default)]
    pub is_managed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn host_envelope_keeps_unknown_fields() {
        let raw = json!({
            "data": [{
                "id": "900A:1",
                "hardwareId": "hw-1",
                "type": "console",
                "ipAddress": "203.0.113.7",
                "owner": true,
                "isBlocked": false,
                "reportedState": { "hostname": "udm-pro" },
                "userData": { "status": "ACTIVE" }
            }],
            "httpStatusCode": 200,
            "traceId": "abc"
        });

        let env: Envelope<Vec<Host>> = serde_json::from_value(raw).expect("valid host envelope");
        assert_eq!(env.http_status_code, Some(200));
        assert_eq!(env.trace_id.as_deref(), Some("abc"));
        let host = &env.data[0];
        assert_eq!(host.host_type.as_deref(), Some("console"));
        assert!(host.owner);
        assert_eq!(host.display_name(), Some("udm-pro"));
        assert!(host.extra.contains_key("userData"));
    }

    #[test]
    fn devices_are_grouped_by_host() {
        let raw = json!({
            "data": [{
                "hostId": "h1",
                "hostName": "Home",
                "devices": [
                    { "id": "d1", "mac": "AABBCCDDEEFF", "name": "AP", "status": "online", "isConsole": false },
                    { "id": "d2", "model": "UDM Pro", "isConsole": true, "uidb": {} }
                ],
                "updatedAt": "2024-06-01T00:00:00Z"
            }]
        });

        let env: Envelope<Vec<HostDevices>> =
            serde_json::from_value(raw).expect("valid devices envelope");
        assert_eq!(env.http_status_code, None);
        let group = &env.data[0];
        assert_eq!(group.host_name.as_deref(), Some("Home"));
        assert_eq!(group.devices.len(), 2);
        assert!(group.devices[1].is_console);
        assert!(group.devices[1].extra.contains_key("uidb"));
    }

    #[test]
    fn site_meta_defaults_when_absent() {
        let site: Site =
            serde_json::from_value(json!({ "siteId": "s1" })).expect("minimal site parses");
        assert!(site.meta.name.is_none());
        assert!(!site.is_owner);
    }
}
