use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque, immutable identifier of a monitored site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SiteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SiteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    /// Never checked.
    #[default]
    Pending,
    /// Checked, content unchanged since the last differing hash.
    Monitoring,
    /// The last check observed a hash different from the stored one.
    ChangeDetected,
    /// The last fetch or processing step failed.
    Error,
}

impl SiteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::Pending => "pending",
            SiteStatus::Monitoring => "monitoring",
            SiteStatus::ChangeDetected => "change_detected",
            SiteStatus::Error => "error",
        }
    }
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Persisted record tracking one external URL's check history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredSite {
    pub id: SiteId,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub last_checked_at: Option<DateTime<Utc>>,
    /// Lowercase hex fingerprint of the last normalized content; empty until
    /// the first successful check.
    #[serde(default)]
    pub last_content_hash: String,
    #[serde(default)]
    pub status: SiteStatus,
    /// Time of the most recent detected change. Never cleared.
    #[serde(default)]
    pub last_changed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MonitoredSite {
    /// A freshly registered site: pending, no hash, never checked.
    pub fn new(
        id: SiteId,
        name: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            last_checked_at: None,
            last_content_hash: String::new(),
            status: SiteStatus::Pending,
            last_changed_at: None,
            last_error: None,
            created_at,
        }
    }

    /// Merge-patch: only fields present in `patch` are overwritten.
    pub fn apply(&mut self, patch: &SitePatch) {
        if let Some(at) = patch.last_checked_at {
            self.last_checked_at = Some(at);
        }
        if let Some(hash) = &patch.last_content_hash {
            self.last_content_hash = hash.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(at) = patch.last_changed_at {
            self.last_changed_at = Some(at);
        }
        if let Some(error) = &patch.last_error {
            self.last_error = error.clone();
        }
    }
}

/// Partial update of a [`MonitoredSite`]. `None` means "leave unchanged".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SitePatch {
    pub last_checked_at: Option<DateTime<Utc>>,
    pub last_content_hash: Option<String>,
    pub status: Option<SiteStatus>,
    pub last_changed_at: Option<DateTime<Utc>>,
    /// `Some(None)` clears the stored error message.
    pub last_error: Option<Option<String>>,
}
