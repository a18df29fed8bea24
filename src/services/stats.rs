use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;
use uuid::Uuid;

use crate::database::models::{OwnerStats, ServiceStats};
use crate::database::repositories::StatsRepository;

/// The aggregation reporter. Numbers are always recomputed from live rows;
/// the moka layer in front is a read-through cache only, and every mutation
/// that touches a service's bookings or assignments invalidates its scope,
/// so a hit is never allowed to outlive the rows it was derived from.
#[derive(Clone)]
pub struct StatsService {
    repository: StatsRepository,
    service_cache: Cache<Uuid, ServiceStats>,
    owner_cache: Cache<Uuid, OwnerStats>,
}

impl StatsService {
    pub fn new(repository: StatsRepository, ttl_secs: u64) -> Self {
        let service_cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();
        let owner_cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            repository,
            service_cache,
            owner_cache,
        }
    }

    pub async fn stats_for_service(&self, service_id: Uuid) -> Result<ServiceStats> {
        if let Some(hit) = self.service_cache.get(&service_id).await {
            return Ok(hit);
        }

        let stats = self.repository.stats_for_service(service_id).await?;
        self.service_cache.insert(service_id, stats.clone()).await;
        Ok(stats)
    }

    pub async fn stats_for_owner(&self, owner_id: Uuid) -> Result<OwnerStats> {
        if let Some(hit) = self.owner_cache.get(&owner_id).await {
            return Ok(hit);
        }

        let stats = self.repository.stats_for_owner(owner_id).await?;
        self.owner_cache.insert(owner_id, stats.clone()).await;
        Ok(stats)
    }

    /// Drop cached aggregates for the touched scope. Called on every booking
    /// create/cancel/status change and every assignment mutation.
    pub async fn invalidate(&self, service_id: Uuid, owner_id: Uuid) {
        self.service_cache.invalidate(&service_id).await;
        self.owner_cache.invalidate(&owner_id).await;
    }
}
