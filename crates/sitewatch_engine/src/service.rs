use std::sync::Arc;

use serde::Serialize;
use sitewatch_core::{validate_new_site, MonitoredSite, SiteId};
use sitewatch_logging::{monitor_info, monitor_warn};

use crate::batch::BatchRunner;
use crate::checker::SiteChecker;
use crate::clock::Clock;
use crate::error::{MonitorError, StoreError};
use crate::fetch::Fetcher;
use crate::store::SiteStore;
use crate::CheckSummary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddSiteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<SiteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManualCheckResponse {
    pub success: bool,
    pub results: Vec<CheckSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SingleCheckResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CheckSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveSiteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Entry points for a UI or scheduler. Every handler answers with an explicit
/// success flag instead of an error.
pub struct MonitorService {
    store: Arc<dyn SiteStore>,
    runner: BatchRunner,
}

impl MonitorService {
    pub fn new(
        store: Arc<dyn SiteStore>,
        fetcher: Arc<dyn Fetcher>,
        clock: Clock,
        max_concurrency: usize,
    ) -> Self {
        let checker = SiteChecker::new(fetcher, store.clone(), clock);
        let runner = BatchRunner::new(checker, store.clone(), max_concurrency);
        Self { store, runner }
    }

    pub fn runner(&self) -> &BatchRunner {
        &self.runner
    }

    pub async fn handle_add_site(&self, name: &str, url: &str) -> AddSiteResponse {
        let result = async {
            let site = validate_new_site(name, url)?;
            let id = self.store.add_site(&site.name, &site.url).await?;
            monitor_info!("Added site {} <{}> as {}", site.name, site.url, id);
            Ok::<_, MonitorError>(id)
        }
        .await;

        match result {
            Ok(id) => AddSiteResponse {
                success: true,
                id: Some(id),
                error: None,
            },
            Err(err) => {
                monitor_warn!("Add site rejected: {}", err);
                AddSiteResponse {
                    success: false,
                    id: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub async fn handle_manual_check(&self) -> ManualCheckResponse {
        match self.runner.check_all_sites().await {
            Ok(report) => ManualCheckResponse {
                success: true,
                results: report.results,
                error: None,
            },
            Err(err) => {
                monitor_warn!("Manual check could not list sites: {}", err);
                ManualCheckResponse {
                    success: false,
                    results: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub async fn handle_single_check(&self, id: &str) -> SingleCheckResponse {
        match self.runner.check_one_site(&SiteId::from(id)).await {
            Ok(result) => SingleCheckResponse {
                success: true,
                result: Some(result),
                error: None,
            },
            Err(err) => SingleCheckResponse {
                success: false,
                result: None,
                error: Some(err.to_string()),
            },
        }
    }

    pub async fn handle_remove_site(&self, id: &str) -> RemoveSiteResponse {
        let id = SiteId::from(id);
        match self.store.delete_site(&id).await.map_err(MonitorError::from) {
            Ok(()) => {
                monitor_info!("Removed site {}", id);
                RemoveSiteResponse {
                    success: true,
                    error: None,
                }
            }
            Err(err) => RemoveSiteResponse {
                success: false,
                error: Some(err.to_string()),
            },
        }
    }

    pub async fn handle_list_sites(&self) -> Result<Vec<MonitoredSite>, StoreError> {
        self.store.get_all_sites().await
    }
}
