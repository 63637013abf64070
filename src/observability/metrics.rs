//! Metrics collection.
//!
//! # Metrics
//! - `funder_balance_checks_total` (counter): balance queries that succeeded
//! - `funder_balance_sol` (gauge): last observed balance
//! - `funder_airdrop_requests_total` (counter): airdrop decisions by outcome
//!
//! # Design Decisions
//! - Uses the `metrics` facade only; installing a recorder/exporter is up to the
//!   embedding application, so these calls are no-ops in the CLI

/// Airdrop outcome label values.
pub const OUTCOME_NOT_NEEDED: &str = "not_needed";
pub const OUTCOME_FUNDED: &str = "funded";
pub const OUTCOME_FAILED: &str = "failed";

/// Record a successful balance query.
pub fn record_balance(balance_sol: f64) {
    metrics::counter!("funder_balance_checks_total").increment(1);
    metrics::gauge!("funder_balance_sol").set(balance_sol);
}

/// Record the result of a conditional airdrop.
pub fn record_airdrop(outcome: &'static str) {
    metrics::counter!("funder_airdrop_requests_total", "outcome" => outcome).increment(1);
}
