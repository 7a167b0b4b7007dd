use crate::types::table::ActivityTable;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone, Default)]
pub struct AppState {
    cache: Arc<DashMap<String, CachedTable>>,
}

struct CachedTable {
    table: ActivityTable,
    inserted_at: Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
        }
    }

    pub fn insert(&self, file_id: String, table: ActivityTable) {
        self.cache.insert(
            file_id,
            CachedTable {
                table,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn get(&self, file_id: &str) -> Option<ActivityTable> {
        self.cache.get(file_id).map(|entry| entry.table.clone())
    }

    pub fn evict_expired(&self, ttl: Duration) {
        let now = Instant::now();
        self.cache.retain(|_, cached| {
            now.duration_since(cached.inserted_at) < ttl
        });
        tracing::info!("Cache eviction complete. Current size: {}", self.cache.len());
    }
}
