//! Compliance balance and banking example.
//!
//! Computes balances for a small fleet, compares routes against the
//! baseline, then banks and applies surplus.

use fueleu_engine::prelude::*;

fn route(id: &str, fuel_type: FuelType, intensity: f64, consumption: f64) -> Route {
    validate(RouteCandidate {
        id: RouteId::new(id),
        route_code: format!("R00{id}"),
        vessel_type: VesselType::Container,
        fuel_type,
        year: 2025,
        ghg_intensity: intensity,
        fuel_consumption: consumption,
        distance: 12_000.0,
        is_baseline: id == "1",
    })
    .unwrap()
}

fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  fueleu-engine: Basic Compliance Example   ║");
    println!("╚════════════════════════════════════════════╝\n");

    let store = InMemoryStore::with_routes(vec![
        route("1", FuelType::Hfo, 91.0, 5000.0),
        route("2", FuelType::Lng, 88.0, 4800.0),
        route("3", FuelType::Mgo, 93.5, 5100.0),
    ]);

    // --- Scenario 1: Route comparison ---
    println!("━━━ Scenario 1: Baseline Comparison ━━━\n");

    let comparison = RouteService::new(&store).compare_routes().unwrap();
    println!("Target intensity: {:.4} gCO2e/MJ", comparison.target);
    for c in &comparison.comparisons {
        println!(
            "  route {}  {:>8.2}  {:>+7.2}%  {}",
            c.route_id,
            c.ghg_intensity,
            c.percent_diff,
            if c.compliant { "✓" } else { "✗" }
        );
    }
    println!();

    // --- Scenario 2: Compliance balances ---
    println!("━━━ Scenario 2: Compliance Balances ━━━\n");

    let evaluator = ComplianceEvaluator::new(&store, &store);
    let ship = ShipId::new("S002");
    let surplus = evaluator.compute_cb(&ship, "R002", 2025).unwrap();
    let deficit = evaluator
        .compute_cb(&ShipId::new("S003"), "R003", 2025)
        .unwrap();
    println!("  {}", surplus);
    println!("  {}", deficit);
    println!();

    // --- Scenario 3: Banking ---
    println!("━━━ Scenario 3: Banking ━━━\n");

    let ledger = BankingLedger::new(&store, &store);
    ledger.bank_surplus(&ship, 2025, 200.0).unwrap();
    let outcome = ledger.apply_banked(&ship, 2025, 75.0).unwrap();
    let summary = ledger.compliance_summary(&ship, 2025).unwrap();

    println!("Banked:           200.00");
    println!("Applied:          {:.2}", outcome.applied);
    println!("Still banked:     {:.2}", outcome.remaining);
    println!("CB after banking: {:.2}", summary.cb_after);

    match ledger.bank_surplus(&ship, 2025, 1000.0) {
        Ok(_) => println!("unexpectedly banked 1000"),
        Err(e) => println!("Banking 1000 refused: {}", e),
    }
}
