use crate::core::ids::ShipId;
use crate::core::pool::{PoolAllocation, PoolMember};
use crate::error::ValidationError;
use std::collections::HashSet;

/// Smallest number of ships a pool may have.
pub const MINIMUM_POOL_MEMBERS: usize = 2;

/// Greedy surplus-to-deficit redistribution for compliance pools.
///
/// # Algorithm
///
/// 1. Order members by `cb_before`, largest surplus first. The sort is
///    stable, so equal balances keep their input order.
/// 2. Walk that order front to back. For each member still in surplus,
///    scan from the back for members still in deficit and move
///    `min(surplus, |deficit|)` across, until the surplus is used up.
/// 3. A single forward pass; an exhausted surplus is never revisited.
///
/// Every transfer is a matched subtract/add pair, so the pool total is
/// conserved. Leftover surplus stays with the ships that had it.
///
/// # Examples
///
/// ```
/// use fueleu_engine::core::pool::PoolMember;
/// use fueleu_engine::pooling::allocator::PoolAllocator;
///
/// let allocations = PoolAllocator::allocate(&[
///     PoolMember::new("S001", 1250.5),
///     PoolMember::new("S002", -800.0),
/// ])
/// .unwrap();
///
/// assert_eq!(allocations[0].cb_after, 450.5);
/// assert_eq!(allocations[1].cb_after, 0.0);
/// ```
pub struct PoolAllocator;

impl PoolAllocator {
    /// Redistribute surplus across `members`.
    ///
    /// Allocations are returned in the same order as `members`. The same
    /// input always yields the same output.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::PoolMinimumMembers`] for fewer than two members.
    /// - [`ValidationError::DuplicatePoolMember`] if a ship is listed twice.
    /// - [`ValidationError::PoolNegativeTotal`] if the balances sum below zero.
    /// - [`ValidationError::MemberExitsWorse`] / [`ValidationError::MemberExitsNegative`]
    ///   if an allocation breaks the fairness rules.
    pub fn allocate(members: &[PoolMember]) -> Result<Vec<PoolAllocation>, ValidationError> {
        Self::check_preconditions(members)?;

        // Indices into `members`, largest surplus first.
        let mut order: Vec<usize> = (0..members.len()).collect();
        order.sort_by(|&a, &b| members[b].cb_before.total_cmp(&members[a].cb_before));

        let mut after: Vec<f64> = members.iter().map(|m| m.cb_before).collect();

        for (pos, &giver) in order.iter().enumerate() {
            if after[giver] <= 0.0 {
                continue;
            }
            for &taker in order[pos + 1..].iter().rev() {
                if after[giver] <= 0.0 {
                    break;
                }
                if after[taker] >= 0.0 {
                    continue;
                }
                let transfer = after[giver].min(-after[taker]);
                after[giver] -= transfer;
                after[taker] += transfer;
            }
        }

        let allocations: Vec<PoolAllocation> = members
            .iter()
            .zip(after)
            .map(|(m, cb_after)| PoolAllocation {
                ship_id: m.ship_id.clone(),
                cb_before: m.cb_before,
                cb_after,
            })
            .collect();

        Self::check_fairness(&allocations)?;
        Ok(allocations)
    }

    fn check_preconditions(members: &[PoolMember]) -> Result<(), ValidationError> {
        if members.len() < MINIMUM_POOL_MEMBERS {
            return Err(ValidationError::PoolMinimumMembers {
                count: members.len(),
            });
        }

        let mut seen: HashSet<&ShipId> = HashSet::with_capacity(members.len());
        for m in members {
            if !seen.insert(&m.ship_id) {
                return Err(ValidationError::DuplicatePoolMember {
                    ship: m.ship_id.clone(),
                });
            }
        }

        let total: f64 = members.iter().map(|m| m.cb_before).sum();
        // `!(total >= 0.0)` also rejects a NaN total.
        if !(total >= 0.0) {
            return Err(ValidationError::PoolNegativeTotal { total });
        }
        Ok(())
    }

    fn check_fairness(allocations: &[PoolAllocation]) -> Result<(), ValidationError> {
        for a in allocations {
            if a.cb_before < 0.0 && a.cb_after < a.cb_before {
                return Err(ValidationError::MemberExitsWorse {
                    ship: a.ship_id.clone(),
                    before: a.cb_before,
                    after: a.cb_after,
                });
            }
            if a.cb_before > 0.0 && a.cb_after < 0.0 {
                return Err(ValidationError::MemberExitsNegative {
                    ship: a.ship_id.clone(),
                    after: a.cb_after,
                });
            }
        }
        Ok(())
    }
}
