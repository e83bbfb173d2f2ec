use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use sitewatch_core::{MonitoredSite, SiteId, SitePatch};
use sitewatch_logging::monitor_info;

use crate::clock::{system_clock, Clock};
use crate::error::StoreError;
use crate::persist::AtomicFile;

/// Persistence for monitored-site records.
///
/// Updates are merge-patches applied last-writer-wins per record; nothing is
/// transactional across sites.
#[async_trait::async_trait]
pub trait SiteStore: Send + Sync {
    /// Registers a pending site and returns its new id.
    async fn add_site(&self, name: &str, url: &str) -> Result<SiteId, StoreError>;
    async fn get_all_sites(&self) -> Result<Vec<MonitoredSite>, StoreError>;
    async fn get_site_by_id(&self, id: &SiteId) -> Result<Option<MonitoredSite>, StoreError>;
    async fn update_site(&self, id: &SiteId, patch: SitePatch) -> Result<(), StoreError>;
    /// Hard delete.
    async fn delete_site(&self, id: &SiteId) -> Result<(), StoreError>;
}

/// Records in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SiteTable {
    #[serde(default)]
    sites: Vec<MonitoredSite>,
}

impl SiteTable {
    fn insert(&mut self, name: &str, url: &str, clock: &Clock) -> SiteId {
        let id = SiteId::new(uuid::Uuid::new_v4().to_string());
        self.sites
            .push(MonitoredSite::new(id.clone(), name, url, clock()));
        id
    }

    fn get(&self, id: &SiteId) -> Option<&MonitoredSite> {
        self.sites.iter().find(|site| &site.id == id)
    }

    fn update(&mut self, id: &SiteId, patch: &SitePatch) -> Result<(), StoreError> {
        let site = self
            .sites
            .iter_mut()
            .find(|site| &site.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        site.apply(patch);
        Ok(())
    }

    fn remove(&mut self, id: &SiteId) -> Result<MonitoredSite, StoreError> {
        let idx = self
            .sites
            .iter()
            .position(|site| &site.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(self.sites.remove(idx))
    }
}

fn lock(table: &Mutex<SiteTable>) -> Result<MutexGuard<'_, SiteTable>, StoreError> {
    table.lock().map_err(|_| StoreError::Poisoned)
}

/// Volatile store for tests and embedding.
pub struct MemorySiteStore {
    table: Mutex<SiteTable>,
    clock: Clock,
}

impl MemorySiteStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            table: Mutex::new(SiteTable::default()),
            clock,
        }
    }

    /// Seed a fully formed record, e.g. one with check history.
    pub fn insert(&self, site: MonitoredSite) -> Result<(), StoreError> {
        lock(&self.table)?.sites.push(site);
        Ok(())
    }
}

impl Default for MemorySiteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SiteStore for MemorySiteStore {
    async fn add_site(&self, name: &str, url: &str) -> Result<SiteId, StoreError> {
        Ok(lock(&self.table)?.insert(name, url, &self.clock))
    }

    async fn get_all_sites(&self) -> Result<Vec<MonitoredSite>, StoreError> {
        Ok(lock(&self.table)?.sites.clone())
    }

    async fn get_site_by_id(&self, id: &SiteId) -> Result<Option<MonitoredSite>, StoreError> {
        Ok(lock(&self.table)?.get(id).cloned())
    }

    async fn update_site(&self, id: &SiteId, patch: SitePatch) -> Result<(), StoreError> {
        lock(&self.table)?.update(id, &patch)
    }

    async fn delete_site(&self, id: &SiteId) -> Result<(), StoreError> {
        lock(&self.table)?.remove(id).map(|_| ())
    }
}

/// Store backed by one JSON document (`{"sites": [...]}`) rewritten atomically
/// after every mutation. The lock is held across the write so the file always
/// reflects the latest in-memory state, and the in-memory table only changes
/// once the write has succeeded.
pub struct JsonFileSiteStore {
    table: tokio::sync::Mutex<SiteTable>,
    file: AtomicFile,
    clock: Clock,
}

impl JsonFileSiteStore {
    /// Load `path`, or start empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_with_clock(path, system_clock())
    }

    pub fn open_with_clock(path: impl Into<PathBuf>, clock: Clock) -> Result<Self, StoreError> {
        let file = AtomicFile::new(path);
        let table = match file.read()? {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(&text)?,
            _ => SiteTable::default(),
        };
        monitor_info!(
            "Opened site store {:?} with {} site(s)",
            file.path(),
            table.sites.len()
        );
        Ok(Self {
            table: tokio::sync::Mutex::new(table),
            file,
            clock,
        })
    }

    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut SiteTable) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut table = self.table.lock().await;
        let mut next = table.clone();
        let value = op(&mut next)?;

        let content = serde_json::to_string_pretty(&next)?;
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.write(&content)).await??;

        *table = next;
        Ok(value)
    }
}

#[async_trait::async_trait]
impl SiteStore for JsonFileSiteStore {
    async fn add_site(&self, name: &str, url: &str) -> Result<SiteId, StoreError> {
        self.mutate(|table| Ok(table.insert(name, url, &self.clock))).await
    }

    async fn get_all_sites(&self) -> Result<Vec<MonitoredSite>, StoreError> {
        Ok(self.table.lock().await.sites.clone())
    }

    async fn get_site_by_id(&self, id: &SiteId) -> Result<Option<MonitoredSite>, StoreError> {
        Ok(self.table.lock().await.get(id).cloned())
    }

    async fn update_site(&self, id: &SiteId, patch: SitePatch) -> Result<(), StoreError> {
        self.mutate(|table| table.update(id, &patch)).await
    }

    async fn delete_site(&self, id: &SiteId) -> Result<(), StoreError> {
        self.mutate(|table| table.remove(id).map(|_| ())).await
    }
}
