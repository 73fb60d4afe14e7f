//! Fleet pooling example.
//!
//! Pools a generated fleet and shows how surplus moves to deficits.

use fueleu_engine::prelude::*;
use fueleu_engine::simulation::fleet::{generate_pool_members, FleetConfig};

fn main() {
    println!("╔═══════════════════════════════════════╗");
    println!("║  fueleu-engine: Fleet Pooling Example  ║");
    println!("╚═══════════════════════════════════════╝\n");

    // --- Scenario 1: Two ships ---
    println!("━━━ Scenario 1: One Surplus, One Deficit ━━━\n");

    let pair = PoolAllocator::allocate(&[
        PoolMember::new("S001", 1250.5),
        PoolMember::new("S002", -800.0),
    ])
    .unwrap();
    for a in &pair {
        println!("  {:<6} {:>10.2} → {:>10.2}", a.ship_id, a.cb_before, a.cb_after);
    }
    println!();

    // --- Scenario 2: Generated fleet ---
    println!("━━━ Scenario 2: Generated Fleet (12 ships) ━━━\n");

    let config = FleetConfig {
        ship_count: 12,
        seed: Some(2025),
        ..Default::default()
    };
    let store = InMemoryStore::new();
    let result = PoolingService::new(&store)
        .create_pool(&PoolRequest {
            year: config.year,
            members: generate_pool_members(&config),
        })
        .unwrap();

    println!("Pool {}\n", result.pool_id);
    for a in &result.allocations {
        let status = if a.transfer() > 0.0 {
            "RECEIVED"
        } else if a.transfer() < 0.0 {
            "GAVE"
        } else {
            "UNCHANGED"
        };
        println!(
            "  {:<6} {:>10.2} → {:>10.2}  [{}]",
            a.ship_id, a.cb_before, a.cb_after, status
        );
    }

    // --- Scenario 3: Rejected pool ---
    println!("\n━━━ Scenario 3: Net-Short Pool ━━━\n");

    match PoolAllocator::allocate(&[
        PoolMember::new("S001", 100.0),
        PoolMember::new("S002", -150.0),
    ]) {
        Ok(_) => println!("unexpectedly formed"),
        Err(e) => println!("Rejected: {}", e),
    }
}
