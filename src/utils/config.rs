use crate::script::error::ScriptError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Template placeholder names and their CLI flags, in display order.
pub const FIELDS: [(&str, &str); 13] = [
    ("searchServer", "search-server"),
    ("nameServers", "name-servers"),
    ("ipOutboundFirewall", "ip-outbound-firewall"),
    ("ipInternalClient", "ip-internal-client"),
    ("ipInternalGateway", "ip-internal-gateway"),
    ("ipInternalNetwork", "ip-internal-network"),
    ("nameExternalCard", "name-external-card"),
    ("nameInternalCard", "name-internal-card"),
    ("tcpAllowedIn", "tcp-allowed-in"),
    ("tcpAllowedOut", "tcp-allowed-out"),
    ("udpAllowedIn", "udp-allowed-in"),
    ("udpAllowedOut", "udp-allowed-out"),
    ("icmpAllowed", "icmp-allowed"),
];

/// Network parameters substituted into the setup script.
///
/// Values are kept exactly as entered. Nothing here is validated or trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationRecord {
    pub search_server: String,
    pub name_servers: String,
    pub ip_outbound_firewall: String,
    pub ip_internal_client: String,
    pub ip_internal_gateway: String,
    pub ip_internal_network: String,
    pub name_external_card: String,
    pub name_internal_card: String,
    pub tcp_allowed_in: String,
    pub tcp_allowed_out: String,
    pub udp_allowed_in: String,
    pub udp_allowed_out: String,
    pub icmp_allowed: FieldValue,
}

/// A field that may arrive either as text or as a JSON boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(true) => "true",
            FieldValue::Flag(false) => "false",
        }
    }

    /// Empty text and `false` switch sections off.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Flag(b) => *b,
        }
    }
}

impl ConfigurationRecord {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ConfigurationRecord, ScriptError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            ScriptError::Config(format!("cannot open {}: {}", path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ScriptError::Config(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    /// Looks up a field by its placeholder name.
    pub fn get(&self, key: &str) -> Option<&str> {
        let val = match key {
            "searchServer" => &self.search_server,
            "nameServers" => &self.name_servers,
            "ipOutboundFirewall" => &self.ip_outbound_firewall,
            "ipInternalClient" => &self.ip_internal_client,
            "ipInternalGateway" => &self.ip_internal_gateway,
            "ipInternalNetwork" => &self.ip_internal_network,
            "nameExternalCard" => &self.name_external_card,
            "nameInternalCard" => &self.name_internal_card,
            "tcpAllowedIn" => &self.tcp_allowed_in,
            "tcpAllowedOut" => &self.tcp_allowed_out,
            "udpAllowedIn" => &self.udp_allowed_in,
            "udpAllowedOut" => &self.udp_allowed_out,
            "icmpAllowed" => return Some(self.icmp_allowed.as_str()),
            _ => return None,
        };
        Some(val.as_str())
    }

    /// Overwrites a field by its placeholder name. Returns false for unknown keys.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "searchServer" => &mut self.search_server,
            "nameServers" => &mut self.name_servers,
            "ipOutboundFirewall" => &mut self.ip_outbound_firewall,
            "ipInternalClient" => &mut self.ip_internal_client,
            "ipInternalGateway" => &mut self.ip_internal_gateway,
            "ipInternalNetwork" => &mut self.ip_internal_network,
            "nameExternalCard" => &mut self.name_external_card,
            "nameInternalCard" => &mut self.name_internal_card,
            "tcpAllowedIn" => &mut self.tcp_allowed_in,
            "tcpAllowedOut" => &mut self.tcp_allowed_out,
            "udpAllowedIn" => &mut self.udp_allowed_in,
            "udpAllowedOut" => &mut self.udp_allowed_out,
            "icmpAllowed" => {
                self.icmp_allowed = FieldValue::Text(value.to_owned());
                return true;
            }
            _ => return false,
        };
        *slot = value.to_owned();
        true
    }

    /// Whether a `{{#key}}` section over this field renders. Unknown keys are falsy.
    pub fn is_truthy(&self, key: &str) -> bool {
        match key {
            "icmpAllowed" => self.icmp_allowed.is_truthy(),
            _ => !self.get(key).unwrap_or_default().is_empty(),
        }
    }
}

/// Everything the collector hands over for one run.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub inputs: ConfigurationRecord,
    pub is_client: bool,
    pub is_reset: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_fields_default_to_empty() {
        let record: ConfigurationRecord =
            serde_json::from_str(r#"{"nameInternalCard": "eth1"}"#).unwrap();
        assert_eq!(record.name_internal_card, "eth1");
        assert_eq!(record.search_server, "");
        assert_eq!(record.icmp_allowed, FieldValue::default());
    }

    #[test]
    fn icmp_allowed_accepts_bool() {
        let record: ConfigurationRecord =
            serde_json::from_str(r#"{"icmpAllowed": true}"#).unwrap();
        assert_eq!(record.icmp_allowed, FieldValue::Flag(true));
        assert_eq!(record.get("icmpAllowed"), Some("true"));
        assert!(record.is_truthy("icmpAllowed"));

        let record: ConfigurationRecord =
            serde_json::from_str(r#"{"icmpAllowed": false}"#).unwrap();
        assert_eq!(record.get("icmpAllowed"), Some("false"));
        assert!(!record.is_truthy("icmpAllowed"));

        let record: ConfigurationRecord =
            serde_json::from_str(r#"{"icmpAllowed": "0,8"}"#).unwrap();
        assert_eq!(record.icmp_allowed, FieldValue::Text("0,8".to_owned()));
        assert!(record.is_truthy("icmpAllowed"));
    }

    #[test]
    fn bool_icmp_survives_a_round_trip() {
        let record: ConfigurationRecord =
            serde_json::from_str(r#"{"icmpAllowed": false}"#).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["icmpAllowed"], false);
    }

    #[test]
    fn cli_override_replaces_bool_with_text() {
        let mut record: ConfigurationRecord =
            serde_json::from_str(r#"{"icmpAllowed": false}"#).unwrap();
        record.set("icmpAllowed", "8");
        assert!(record.is_truthy("icmpAllowed"));
        assert_eq!(record.get("icmpAllowed"), Some("8"));
    }

    #[test]
    fn every_field_is_addressable() {
        let mut record = ConfigurationRecord::default();
        for (field, _) in FIELDS {
            assert!(record.set(field, field));
            assert_eq!(record.get(field), Some(field));
        }
        assert!(!record.set("bogus", "x"));
        assert_eq!(record.get("bogus"), None);
    }

    #[test]
    fn serialized_keys_match_placeholders() {
        let value = serde_json::to_value(ConfigurationRecord::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), FIELDS.len());
        for (field, _) in FIELDS {
            assert!(obj.contains_key(field), "missing {}", field);
        }
    }

    #[test]
    fn flags_are_kebab_case_keys() {
        for (field, flag) in FIELDS {
            assert_eq!(flag.replace('-', ""), field.to_lowercase());
            assert!(!flag.chars().any(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn from_file_reads_json() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"{{"nameExternalCard": "eno1", "tcpAllowedIn": "22 80 443"}}"#
        )
        .unwrap();
        let record = ConfigurationRecord::from_file(tmp.path()).unwrap();
        assert_eq!(record.name_external_card, "eno1");
        assert_eq!(record.tcp_allowed_in, "22 80 443");
    }

    #[test]
    fn from_file_rejects_garbage() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "not json").unwrap();
        assert!(matches!(
            ConfigurationRecord::from_file(tmp.path()),
            Err(ScriptError::Config(_))
        ));
    }
}
