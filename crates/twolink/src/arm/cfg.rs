//! Tolerance defaults for the solver (internal).
//!
//! Policy
//! - Fixed constants; the solver has no tunable numerics beyond these.

/// Slack allowed on the `[0, π]` post-condition before the exit clamp.
/// Anything larger is a logic error and trips a debug assertion.
pub(crate) const LIMIT_SLACK: f64 = 1e-9;
