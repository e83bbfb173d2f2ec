use std::sync::Arc;

use sitewatch_core::{fingerprint, normalize, plan_check_update, CheckOutcome, MonitoredSite, SiteStatus};
use sitewatch_logging::{monitor_debug, monitor_error, monitor_info, monitor_warn};

use crate::clock::Clock;
use crate::decode::decode_body;
use crate::fetch::Fetcher;
use crate::store::SiteStore;
use crate::CheckSummary;

/// Runs fetch -> decode -> normalize -> fingerprint -> compare -> persist for
/// one site. Every failure ends up in the returned summary; nothing escapes.
pub struct SiteChecker {
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn SiteStore>,
    clock: Clock,
}

impl SiteChecker {
    pub fn new(fetcher: Arc<dyn Fetcher>, store: Arc<dyn SiteStore>, clock: Clock) -> Self {
        Self {
            fetcher,
            store,
            clock,
        }
    }

    pub async fn check_site(&self, site: &MonitoredSite) -> CheckSummary {
        let outcome = self.observe(site).await;
        let now = (self.clock)();
        let patch = plan_check_update(site, outcome, now);
        let status = patch.status.unwrap_or(site.status);
        let error = patch.last_error.clone().flatten();

        if let Err(err) = self.store.update_site(&site.id, patch).await {
            monitor_error!("Failed to store check result for {} ({}): {}", site.name, site.id, err);
            return CheckSummary {
                id: site.id.clone(),
                name: site.name.clone(),
                status: SiteStatus::Error,
                error: Some(format!("failed to store check result: {err}")),
            };
        }

        match status {
            SiteStatus::ChangeDetected => monitor_info!("Change detected on {} <{}>", site.name, site.url),
            SiteStatus::Error => {}
            _ => monitor_debug!("No change on {} <{}>", site.name, site.url),
        }

        CheckSummary {
            id: site.id.clone(),
            name: site.name.clone(),
            status,
            error,
        }
    }

    async fn observe(&self, site: &MonitoredSite) -> CheckOutcome {
        let output = match self.fetcher.fetch(&site.url).await {
            Ok(output) => output,
            Err(err) => {
                monitor_warn!("Check failed for {} <{}>: {}", site.name, site.url, err);
                return CheckOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        let body = decode_body(&output.bytes, output.metadata.content_type.as_deref());
        if body.had_errors {
            monitor_warn!(
                "Body of {} <{}> had malformed {} sequences; replaced",
                site.name,
                output.metadata.final_url,
                body.encoding_label
            );
        }
        let content_hash = fingerprint(&normalize(&body.text));
        monitor_debug!(
            "Fetched {} bytes from {} (redirects={}) hash={}",
            output.metadata.byte_len,
            output.metadata.final_url,
            output.metadata.redirect_count,
            content_hash
        );
        CheckOutcome::Fetched { content_hash }
    }
}
