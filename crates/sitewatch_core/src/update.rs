use chrono::{DateTime, Utc};

use crate::{MonitoredSite, SitePatch, SiteStatus};

/// Result of fetching and fingerprinting one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Page fetched and reduced to `content_hash`.
    Fetched { content_hash: String },
    /// Fetch or processing failed; `reason` is kept for display.
    Failed { reason: String },
}

/// Pure transition: decides which fields a check writes back to `site`.
///
/// A failure only advances `last_checked_at` and flags the error, leaving the
/// stored hash and change time intact. A success always stores the new hash;
/// it reports `ChangeDetected` (and stamps `last_changed_at`) only when a
/// previous, different hash existed. The first successful check and every
/// unchanged check yield `Monitoring`.
pub fn plan_check_update(
    site: &MonitoredSite,
    outcome: CheckOutcome,
    now: DateTime<Utc>,
) -> SitePatch {
    match outcome {
        CheckOutcome::Failed { reason } => SitePatch {
            last_checked_at: Some(now),
            status: Some(SiteStatus::Error),
            last_error: Some(Some(reason)),
            ..SitePatch::default()
        },
        CheckOutcome::Fetched { content_hash } => {
            let changed = !site.last_content_hash.is_empty()
                && site.last_content_hash != content_hash;
            SitePatch {
                last_checked_at: Some(now),
                last_content_hash: Some(content_hash),
                status: Some(if changed {
                    SiteStatus::ChangeDetected
                } else {
                    SiteStatus::Monitoring
                }),
                last_changed_at: changed.then_some(now),
                last_error: Some(None),
            }
        }
    }
}
