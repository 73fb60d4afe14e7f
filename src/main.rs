//! fueleu-engine CLI
//!
//! Compute compliance balances, compare routes and form pools from the
//! command line.
//!
//! # Usage
//!
//! ```bash
//! # List routes with total emissions
//! fueleu-engine routes --input routes.json --fuel-type LNG
//!
//! # Compare every route against the baseline
//! fueleu-engine compare --input routes.json --baseline 1
//!
//! # Compliance balance of one route
//! fueleu-engine cb --input routes.json --route R001 --year 2025
//!
//! # Allocate a pool
//! fueleu-engine pool --input pool.json --format json
//!
//! # Generate a random fleet for testing
//! fueleu-engine generate --ships 10 --pool
//! ```

use fueleu_engine::compliance::comparison::{RouteComparison, RouteService, RouteSummary};
use fueleu_engine::compliance::evaluator::ComplianceEvaluator;
use fueleu_engine::core::ids::{RouteId, ShipId};
use fueleu_engine::core::route::{Route, RouteFilter};
use fueleu_engine::pooling::service::{PoolRequest, PoolResult, PoolingService};
use fueleu_engine::ports::ComplianceStore;
use fueleu_engine::simulation::fleet::{generate_pool_members, generate_routes, FleetConfig};
use fueleu_engine::store::memory::InMemoryStore;
use serde::de::DeserializeOwned;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"fueleu-engine — maritime GHG compliance balance, banking and pooling

USAGE:
    fueleu-engine <COMMAND> [OPTIONS]

COMMANDS:
    routes      List routes with total emissions
    compare     Compare routes against the baseline
    cb          Compute a ship's compliance balance from a route
    pool        Allocate a compliance pool
    generate    Generate a random fleet (for testing)
    help        Show this message

OPTIONS (routes, compare, cb):
    --input <FILE>        Path to JSON routes file
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (routes):
    --vessel-type <TYPE>  Container, BulkCarrier, Tanker or RoRo
    --fuel-type <FUEL>    HFO, LNG or MGO
    --year <YEAR>         Reporting year

OPTIONS (compare):
    --baseline <ID>       Designate this route id as baseline first

OPTIONS (cb):
    --route <CODE>        Route code (required)
    --year <YEAR>         Target year (required)
    --ship <ID>           Ship id (default: the route code)

OPTIONS (pool):
    --input <FILE>        Path to JSON pool request
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (generate):
    --ships <N>           Number of ships (default: 10)
    --year <YEAR>         Reporting year (default: 2025)
    --seed <N>            Seed for a reproducible fleet
    --pool                Emit a pool request instead of routes
    --output <FILE>       Write to file instead of stdout

Set RUST_LOG=debug for per-computation logging.

EXAMPLES:
    fueleu-engine routes --input routes.json --vessel-type Container
    fueleu-engine compare --input routes.json --format json
    fueleu-engine cb --input routes.json --route R002 --year 2030
    fueleu-engine pool --input pool.json
    fueleu-engine generate --ships 20 --pool --output pool.json"#
    );
}

#[derive(serde::Deserialize)]
struct RoutesFile {
    routes: Vec<Route>,
}

/// Flags shared by every subcommand.
#[derive(Default)]
struct Options {
    input: Option<String>,
    output: Option<String>,
    json: bool,
    filter: RouteFilter,
    route: Option<String>,
    ship: Option<String>,
    baseline: Option<String>,
    year: Option<u16>,
    ships: Option<usize>,
    seed: Option<u64>,
    pool: bool,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    args.get(i)
        .map(String::as_str)
        .unwrap_or_else(|| fail(format!("{flag} requires a value")))
}

fn parsed<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T
where
    T::Err: std::fmt::Display,
{
    let raw = value(args, i, flag);
    raw.parse()
        .unwrap_or_else(|e| fail(format!("invalid value '{raw}' for {flag}: {e}")))
}

fn parse_options(args: &[String]) -> Options {
    let mut opts = Options::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--input" => {
                i += 1;
                opts.input = Some(value(args, i, flag).to_string());
            }
            "--output" => {
                i += 1;
                opts.output = Some(value(args, i, flag).to_string());
            }
            "--format" => {
                i += 1;
                opts.json = match value(args, i, flag) {
                    "json" => true,
                    "text" => false,
                    other => fail(format!("unknown format: {other}")),
                };
            }
            "--vessel-type" => {
                i += 1;
                opts.filter.vessel_type = Some(parsed(args, i, flag));
            }
            "--fuel-type" => {
                i += 1;
                opts.filter.fuel_type = Some(parsed(args, i, flag));
            }
            "--year" => {
                i += 1;
                let year = parsed(args, i, flag);
                opts.year = Some(year);
                opts.filter.year = Some(year);
            }
            "--route" => {
                i += 1;
                opts.route = Some(value(args, i, flag).to_string());
            }
            "--ship" => {
                i += 1;
                opts.ship = Some(value(args, i, flag).to_string());
            }
            "--baseline" => {
                i += 1;
                opts.baseline = Some(value(args, i, flag).to_string());
            }
            "--ships" => {
                i += 1;
                opts.ships = Some(parsed(args, i, flag));
            }
            "--seed" => {
                i += 1;
                opts.seed = Some(parsed(args, i, flag));
            }
            "--pool" => opts.pool = true,
            _ => fail(format!("unknown option: {flag}")),
        }
        i += 1;
    }
    opts
}

fn load_json<T: DeserializeOwned>(opts: &Options) -> T {
    let path = opts
        .input
        .as_deref()
        .unwrap_or_else(|| fail("--input <FILE> is required"));
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{path}': {e}")));
    serde_json::from_str(&content).unwrap_or_else(|e| fail(format!("parsing '{path}': {e}")))
}

fn load_store(opts: &Options) -> InMemoryStore {
    let file: RoutesFile = load_json(opts);
    InMemoryStore::with_routes(file.routes)
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

fn cmd_routes(opts: &Options) {
    let store = load_store(opts);
    let summaries: Vec<RouteSummary> = RouteService::new(&store)
        .list_routes(&opts.filter)
        .unwrap_or_else(|e| fail(e));

    if opts.json {
        print_json(&summaries);
        return;
    }
    println!(
        "{:<8} {:<12} {:<5} {:>5} {:>10} {:>12} {:>14}  ",
        "CODE", "VESSEL", "FUEL", "YEAR", "INTENSITY", "FUEL (t)", "EMISSIONS (t)"
    );
    for s in &summaries {
        println!(
            "{:<8} {:<12} {:<5} {:>5} {:>10.2} {:>12.1} {:>14.1}  {}",
            s.route_code,
            s.vessel_type,
            s.fuel_type,
            s.year,
            s.ghg_intensity,
            s.fuel_consumption,
            s.total_emissions,
            if s.is_baseline { "[baseline]" } else { "" }
        );
    }
    println!("\n{} route(s)", summaries.len());
}

fn print_comparison(comparison: &RouteComparison) {
    println!(
        "Baseline: route {} at {:.4} gCO2e/MJ",
        comparison.baseline.route_id, comparison.baseline.ghg_intensity
    );
    println!("Target:   {:.4} gCO2e/MJ\n", comparison.target);
    for c in &comparison.comparisons {
        println!(
            "  {:<8} {:>10.4} {:>+9.2}%  {}",
            c.route_id,
            c.ghg_intensity,
            c.percent_diff,
            if c.compliant { "compliant" } else { "NON-COMPLIANT" }
        );
    }
    println!(
        "\n{} of {} route(s) compliant",
        comparison.compliant_count(),
        comparison.comparisons.len()
    );
}

fn cmd_compare(opts: &Options) {
    let store = load_store(opts);
    let service = RouteService::new(&store);
    if let Some(id) = &opts.baseline {
        service
            .set_baseline(&RouteId::new(id.as_str()))
            .unwrap_or_else(|e| fail(e));
    }
    let comparison = service.compare_routes().unwrap_or_else(|e| fail(e));

    if opts.json {
        print_json(&comparison);
    } else {
        print_comparison(&comparison);
    }
}

fn cmd_cb(opts: &Options) {
    let store = load_store(opts);
    let code = opts
        .route
        .as_deref()
        .unwrap_or_else(|| fail("--route <CODE> is required"));
    let year = opts.year.unwrap_or_else(|| fail("--year <YEAR> is required"));
    let ship = ShipId::new(opts.ship.as_deref().unwrap_or(code));

    let balance = ComplianceEvaluator::new(&store, &store)
        .compute_cb(&ship, code, year)
        .unwrap_or_else(|e| fail(e));

    if opts.json {
        match store.find(&ship, year) {
            Ok(Some(record)) => print_json(&record),
            Ok(None) => print_json(&balance),
            Err(e) => fail(e),
        }
    } else {
        let status = if balance.is_surplus() {
            "SURPLUS"
        } else if balance.is_deficit() {
            "DEFICIT"
        } else {
            "COMPLIANT"
        };
        println!("{}  [{}]", balance, status);
    }
}

fn print_pool(result: &PoolResult) {
    println!("Pool {}\n", result.pool_id);
    println!("  {:<10} {:>14} {:>14} {:>14}", "SHIP", "CB BEFORE", "CB AFTER", "TRANSFER");
    for a in &result.allocations {
        println!(
            "  {:<10} {:>14.2} {:>14.2} {:>+14.2}",
            a.ship_id,
            a.cb_before,
            a.cb_after,
            a.transfer()
        );
    }
    let before: f64 = result.allocations.iter().map(|a| a.cb_before).sum();
    let after: f64 = result.allocations.iter().map(|a| a.cb_after).sum();
    println!("\n  Total before: {:.2}", before);
    println!("  Total after:  {:.2}", after);
}

fn cmd_pool(opts: &Options) {
    let request: PoolRequest = load_json(opts);
    let store = InMemoryStore::new();
    let result = PoolingService::new(&store)
        .create_pool(&request)
        .unwrap_or_else(|e| fail(e));

    if opts.json {
        print_json(&result);
    } else {
        print_pool(&result);
    }
}

fn cmd_generate(opts: &Options) {
    let config = FleetConfig {
        ship_count: opts.ships.unwrap_or(10),
        year: opts.year.unwrap_or(2025),
        seed: opts.seed,
        ..Default::default()
    };

    let rendered = if opts.pool {
        serde_json::to_string_pretty(&PoolRequest {
            year: config.year,
            members: generate_pool_members(&config),
        })
    } else {
        serde_json::to_string_pretty(&serde_json::json!({ "routes": generate_routes(&config) }))
    };
    let json = rendered.unwrap_or_else(|e| fail(e));

    if let Some(path) = &opts.output {
        fs::write(path, &json).unwrap_or_else(|e| fail(format!("writing to '{path}': {e}")));
        eprintln!("Generated {} ship(s) → {}", config.ship_count, path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }
    let opts = parse_options(&args[2..]);

    match command {
        "routes" => cmd_routes(&opts),
        "compare" => cmd_compare(&opts),
        "cb" => cmd_cb(&opts),
        "pool" => cmd_pool(&opts),
        "generate" => cmd_generate(&opts),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
