//! Domain values: identifiers, routes, balances and persisted records.

pub mod balance;
pub mod ids;
pub mod pool;
pub mod record;
pub mod route;
