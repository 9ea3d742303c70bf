//! Process-wide logging setup shared by the binaries.

/// Tracing subscriber configuration (filter, JSON formatter).
pub mod tracing;

pub use crate::tracing::{DEFAULT_FILTER, init, init_with_default};
