use std::convert::Infallible;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============ Record Types ============

/// DNS record type.
///
/// The API sends record types in lowercase (`"a"`, `"ns"`, ...). Parsing is
/// case-insensitive, and unknown types are kept verbatim in [`RecordType::Other`]
/// so that listing a zone never fails because of a type this crate does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Text record.
    Txt,
    /// Certification Authority Authorization record.
    Caa,
    /// Reverse pointer record.
    Ptr,
    /// Any other type, stored lowercase.
    Other(String),
}

impl RecordType {
    /// Wire representation (lowercase).
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "a",
            Self::Aaaa => "aaaa",
            Self::Cname => "cname",
            Self::Mx => "mx",
            Self::Ns => "ns",
            Self::Srv => "srv",
            Self::Txt => "txt",
            Self::Caa => "caa",
            Self::Ptr => "ptr",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Self::A,
            "aaaa" => Self::Aaaa,
            "cname" => Self::Cname,
            "mx" => Self::Mx,
            "ns" => Self::Ns,
            "srv" => Self::Srv,
            "txt" => Self::Txt,
            "caa" => Self::Caa,
            "ptr" => Self::Ptr,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for RecordType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

// ============ Entities ============

/// A single DNS resource record inside a zone.
///
/// Records returned by the API carry a server-assigned `id` and timestamps.
/// Records built with [`Record::new`] leave those unset; unset fields are not
/// sent when the record is used as a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier, assigned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Record type.
    pub record_type: RecordType,
    /// Record name relative to the zone (`"@"` for the apex, `"*"` for wildcard).
    pub name: String,
    /// Record content (address, target host, text, ...).
    pub content: String,
    /// Time-to-live in seconds.
    pub ttl: u32,
    /// Owning zone identifier. Not every endpoint includes it.
    #[serde(
        rename = "dns_zone_id",
        alias = "zone_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub zone_id: Option<String>,
    /// Creation time, set by the server.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time, set by the server.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Builds a record suitable for [`create_record`](crate::DnsZoneApi::create_record).
    pub fn new(
        record_type: RecordType,
        name: impl Into<String>,
        content: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            id: None,
            record_type,
            name: name.into(),
            content: content.into(),
            ttl,
            zone_id: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// A DNS zone (domain) managed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier.
    pub id: String,
    /// Domain name (e.g., `"example.com"`).
    pub name: String,
    /// Records of the zone, in the order returned by the API.
    #[serde(default)]
    pub records: Vec<Record>,
    /// Creation time, set by the server.
    #[serde(with = "crate::utils::datetime::required")]
    pub created_at: DateTime<Utc>,
    /// Last modification time, set by the server.
    #[serde(with = "crate::utils::datetime::required")]
    pub updated_at: DateTime<Utc>,
}

// ============ Filters ============

/// Query filter for listing zones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonesFilter {
    /// Exact zone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ZonesFilter {
    /// Filter by zone name.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.name
            .iter()
            .map(|name| ("name", name.clone()))
            .collect()
    }
}

/// Query filter for listing the records of a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsFilter {
    /// Record name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Record type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    /// Record content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl RecordsFilter {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(record_type) = &self.record_type {
            pairs.push(("record_type", record_type.as_str().to_string()));
        }
        if let Some(content) = &self.content {
            pairs.push(("content", content.clone()));
        }
        pairs
    }
}

// ============ Wire Envelopes ============

#[derive(Debug, Serialize)]
pub(crate) struct CreateZoneBody<'a> {
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ZoneResponse {
    pub dns_zone: Zone,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ZonesResponse {
    #[serde(default)]
    pub dns_zones: Vec<Zone>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordResponse {
    pub record: Record,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteResponse {
    #[serde(default)]
    pub deleted: bool,
}
