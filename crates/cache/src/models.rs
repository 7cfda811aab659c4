//! Cache models.

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use time::UtcDateTime;

/// How long an entry (or anything derived from it) stays valid.
///
/// Serialized as a signed number of seconds where `-1` means permanent, which
/// is what page caches downstream of us already speak.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum MaxAge {
    /// Valid until explicitly deleted or invalidated by tag.
    Permanent,
    /// Valid for this many seconds after creation.
    Seconds(u64),
}
impl MaxAge {
    const PERMANENT: i64 = -1;

    /// The stricter of two max ages.
    pub fn min(self, other: Self) -> Self {
        match self.cmp(&other) {
            Ordering::Greater => other,
            _ => self,
        }
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Permanent)
    }
}
impl Ord for MaxAge {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Permanent, Self::Permanent) => Ordering::Equal,
            (Self::Permanent, Self::Seconds(_)) => Ordering::Greater,
            (Self::Seconds(_), Self::Permanent) => Ordering::Less,
            (Self::Seconds(a), Self::Seconds(b)) => a.cmp(b),
        }
    }
}
impl PartialOrd for MaxAge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl From<MaxAge> for i64 {
    fn from(value: MaxAge) -> Self {
        match value {
            MaxAge::Permanent => MaxAge::PERMANENT,
            MaxAge::Seconds(s) => i64::try_from(s).unwrap_or(i64::MAX),
        }
    }
}
impl TryFrom<i64> for MaxAge {
    type Error = ErrorKind;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            MaxAge::PERMANENT => Ok(Self::Permanent),
            s if s >= 0 => Ok(Self::Seconds(s.unsigned_abs())),
            invalid => Err(ErrorKind::InvalidMaxAge(invalid)),
        }
    }
}

/// A stored cache item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub value: String,
    pub max_age: MaxAge,
    pub tags: BTreeSet<String>,
    /// Unix timestamp (seconds) of the write.
    pub created: i64,
}
impl CacheEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>, max_age: MaxAge, tags: &[&str]) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            max_age,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created: UtcDateTime::now().unix_timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(UtcDateTime::now().unix_timestamp())
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.max_age {
            MaxAge::Permanent => false,
            MaxAge::Seconds(s) => now >= self.created.saturating_add(i64::try_from(s).unwrap_or(i64::MAX)),
        }
    }

    /// Whether the entry carries at least one of the given tags.
    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.tags.contains(*tag))
    }
}
