use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One resource-record-set as LiveDNS reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    #[serde(rename = "rrset_name")]
    pub name: String,
    #[serde(rename = "rrset_type")]
    pub record_type: String,
    #[serde(rename = "rrset_values", default)]
    pub values: Vec<String>,
    #[serde(rename = "rrset_ttl", default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl ZoneRecord {
    pub fn new(name: &str, record_type: &str, values: &[&str], ttl: u32) -> Self {
        Self {
            name: name.to_string(),
            record_type: record_type.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
            ttl: Some(ttl),
        }
    }

    /// First value, trimmed. `None` when the record set is empty.
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(|v| v.trim())
    }
}

/// Desired end state of one (name, type) pair. Replaces every existing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdate {
    pub name: String,
    pub record_type: String,
    pub value: String,
    pub ttl: u32,
}

#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Every record currently published in the zone, in provider order
    async fn list_records(&self, domain: &str) -> Result<Vec<ZoneRecord>>;

    /// Replace the value set of `update.name`/`update.record_type` with `[update.value]`
    async fn replace_record(&self, domain: &str, update: &RecordUpdate) -> Result<()>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_record_deserialization() {
        let json = r#"{
            "rrset_name": "@",
            "rrset_type": "A",
            "rrset_values": ["203.0.113.9"],
            "rrset_ttl": 10800,
            "rrset_href": "https://dns.api.gandi.net/api/v5/domains/example.com/records/%40/A"
        }"#;

        let record: ZoneRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, ZoneRecord::new("@", "A", &["203.0.113.9"], 10800));
    }

    #[test]
    fn test_zone_record_requires_name_and_type() {
        let json = r#"{"rrset_values": ["203.0.113.9"]}"#;
        assert!(serde_json::from_str::<ZoneRecord>(json).is_err());
    }

    #[test]
    fn test_first_value_trims() {
        let record = ZoneRecord::new("@", "A", &[" 203.0.113.9\n", "203.0.113.10"], 300);
        assert_eq!(record.first_value(), Some("203.0.113.9"));

        let empty = ZoneRecord::new("@", "A", &[], 300);
        assert_eq!(empty.first_value(), None);
    }
}
