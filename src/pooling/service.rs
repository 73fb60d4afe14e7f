use crate::core::pool::{PoolAllocation, PoolMember};
use crate::core::route::MINIMUM_YEAR;
use crate::error::{ComplianceResult, ValidationError};
use crate::pooling::allocator::PoolAllocator;
use crate::ports::PoolStore;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to form a pool for one reporting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRequest {
    pub year: u16,
    pub members: Vec<PoolMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolResult {
    pub pool_id: Uuid,
    pub allocations: Vec<PoolAllocation>,
}

/// Allocates pools and persists them.
pub struct PoolingService<'a> {
    pools: &'a dyn PoolStore,
}

impl<'a> PoolingService<'a> {
    pub fn new(pools: &'a dyn PoolStore) -> Self {
        Self { pools }
    }

    /// Allocate `request` and persist the pool. Nothing is written unless
    /// allocation succeeds.
    pub fn create_pool(&self, request: &PoolRequest) -> ComplianceResult<PoolResult> {
        if request.year < MINIMUM_YEAR {
            return Err(ValidationError::YearTooEarly { year: request.year }.into());
        }

        let allocations = PoolAllocator::allocate(&request.members).map_err(|e| {
            warn!("pool for {} rejected: {}", request.year, e);
            e
        })?;
        for a in &allocations {
            debug!("{}: {} -> {}", a.ship_id, a.cb_before, a.cb_after);
        }

        let pool = self.pools.create(request.year, &allocations)?;
        info!(
            "created pool {} for {} with {} members",
            pool.id,
            pool.year,
            pool.members.len()
        );
        Ok(PoolResult {
            pool_id: pool.id,
            allocations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComplianceError;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_create_pool_persists() {
        let store = InMemoryStore::new();
        let service = PoolingService::new(&store);

        let result = service
            .create_pool(&PoolRequest {
                year: 2025,
                members: vec![
                    PoolMember::new("S001", 1250.5),
                    PoolMember::new("S002", -800.0),
                ],
            })
            .unwrap();

        let pools = store.pools().unwrap();
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].id, result.pool_id);
        assert_eq!(pools[0].year, 2025);
        assert_eq!(pools[0].members, result.allocations);
    }

    #[test]
    fn test_rejected_pool_writes_nothing() {
        let store = InMemoryStore::new();
        let service = PoolingService::new(&store);

        let err = service
            .create_pool(&PoolRequest {
                year: 2025,
                members: vec![
                    PoolMember::new("S001", 100.0),
                    PoolMember::new("S002", -150.0),
                ],
            })
            .unwrap_err();

        assert!(matches!(
            err,
            ComplianceError::Validation(ValidationError::PoolNegativeTotal { .. })
        ));
        assert!(store.pools().unwrap().is_empty());
    }

    #[test]
    fn test_pool_year_checked() {
        let store = InMemoryStore::new();
        let err = PoolingService::new(&store)
            .create_pool(&PoolRequest {
                year: 2020,
                members: vec![PoolMember::new("S001", 1.0), PoolMember::new("S002", 1.0)],
            })
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_request_json_shape() {
        let request: PoolRequest = serde_json::from_str(
            r#"{"year": 2025, "members": [{"shipId": "S001", "cbBefore": 10}, {"shipId": "S002", "cbBefore": -4}]}"#,
        )
        .unwrap();
        assert_eq!(request.members[1].cb_before, -4.0);
    }
}
