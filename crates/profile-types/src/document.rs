//! Search document derived from a live profile record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::ProfileRecord;

/// Payload of an upsert against the search backend.
///
/// Exists only for the duration of one index call; it is never persisted by
/// this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    pub id: Uuid,

    /// Always rendered as RFC 3339 in UTC with second precision
    #[serde(with = "rfc3339_utc")]
    pub created_at: DateTime<Utc>,

    pub profile_user: Uuid,

    pub profile_name: String,

    pub profile_picture: String,

    pub version: i32,
}

impl From<&ProfileRecord> for IndexDocument {
    fn from(record: &ProfileRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            profile_user: record.profile_user,
            profile_name: record.profile_name.clone(),
            profile_picture: record.profile_picture.clone(),
            version: record.version,
        }
    }
}

impl IndexDocument {
    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

mod rfc3339_utc {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
