//! Observability for ranklink
//!
//! Structured logging only:
//! - Structured logs (JSON)
//! - Deterministic key ordering
//! - One log line = one event
//! - Synchronous, no buffering
//!
//! Logging failure must never affect command handling.

mod logger;

pub use logger::{Logger, Severity};
