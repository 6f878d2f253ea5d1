//! Planar two-link arm: configuration, derived geometry, IK and FK.
//!
//! Purpose
//! - Closed-form inverse kinematics with a total case analysis: every finite
//!   target yields joint angles within `[0, π]²` plus a `State` tag naming
//!   the branch (exact, beyond reach, inside minimum reach, joint-limited).
//! - Forward kinematics with the same angle convention, used by renderers
//!   and as the oracle in tests.
//!
//! Data flow
//! - `ArmConfig` → `DerivedGeometry::new` (validates) → `solve` / `forward`.
//! - Nothing here holds state across calls; all types are `Copy` values.

mod cfg;
mod forward;
mod geometry;
pub mod rand;
mod solver;
mod types;
mod workspace;

pub use forward::forward;
pub use geometry::DerivedGeometry;
pub use solver::{solve, solve_pretested};
pub use types::{ArmConfig, ConfigError, ConfigLimits, Joints, SolveResult, State};
pub use workspace::{classify, Arc, Region, Workspace};
