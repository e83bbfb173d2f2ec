use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use sitewatch_core::{SiteId, SiteStatus};
use sitewatch_logging::monitor_info;

use crate::checker::SiteChecker;
use crate::error::{MonitorError, StoreError};
use crate::store::SiteStore;
use crate::{BatchReport, CheckSummary};

pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Checks every registered site, or a single one by id.
pub struct BatchRunner {
    checker: SiteChecker,
    store: Arc<dyn SiteStore>,
    max_concurrency: usize,
}

impl BatchRunner {
    /// `max_concurrency == 0` lifts the bound: every site is in flight at once.
    pub fn new(checker: SiteChecker, store: Arc<dyn SiteStore>, max_concurrency: usize) -> Self {
        Self {
            checker,
            store,
            max_concurrency,
        }
    }

    /// One result per stored site, in store order. Individual site failures
    /// are reported in their row; only failing to list the sites is an error.
    pub async fn check_all_sites(&self) -> Result<BatchReport, StoreError> {
        let sites = self.store.get_all_sites().await?;
        let limit = match self.max_concurrency {
            0 => sites.len().max(1),
            n => n,
        };
        monitor_info!("Checking {} site(s), up to {} at a time", sites.len(), limit);

        let results: Vec<CheckSummary> = stream::iter(sites.iter())
            .map(|site| self.checker.check_site(site))
            .buffered(limit)
            .collect()
            .await;

        let report = BatchReport { results };
        monitor_info!(
            "Batch done: {} checked, {} changed, {} failed",
            report.results.len(),
            report.count(SiteStatus::ChangeDetected),
            report.count(SiteStatus::Error)
        );
        Ok(report)
    }

    pub async fn check_one_site(&self, id: &SiteId) -> Result<CheckSummary, MonitorError> {
        let site = self
            .store
            .get_site_by_id(id)
            .await?
            .ok_or_else(|| MonitorError::NotFound(id.clone()))?;
        Ok(self.checker.check_site(&site).await)
    }
}
