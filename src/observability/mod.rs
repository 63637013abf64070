//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! wallet / funding / client
//!     → tracing events (structured fields, never secret material)
//!     → logging.rs (EnvFilter + fmt layer, JSON or compact)
//!
//! funding
//!     → metrics.rs (balance gauge, airdrop outcome counters)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
