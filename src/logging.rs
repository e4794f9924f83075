//! Logging utilities for api-regress
//!
//! Re-exports tracing macros with log_* naming so runner, executor and
//! comparator all emit structured events the same way.

pub(crate) use tracing::{
    debug as log_debug,
    error as log_error,
    info as log_info,
    trace as log_trace,
    warn as log_warn,
};
