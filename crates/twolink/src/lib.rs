//! Closed-form inverse kinematics for a planar two-link arm.
//!
//! The arm has a shoulder joint at the origin, rotated by a fixed baseline
//! angle `beta` away from the vertical, and an elbow joint between two rigid
//! links `l1` and `l2`. Both joint angles are limited to `[0, π]`.
//!
//! Layout
//! - `arm`: configuration, derived geometry, the cascade solver, forward
//!   kinematics and the reachable-region workspace.
//! - `session`: event boundary for interactive callers (pointer moves and
//!   configuration changes).
//! - `api`: the two calls a renderer needs, `solve` and `forward`.
//!
//! Conventions
//! - Targets live in the arm frame: origin at the shoulder, y-axis up.
//! - Joint angle zero points along −y; angles increase clockwise.

pub mod api;
pub mod arm;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use arm::{ArmConfig, ConfigError, DerivedGeometry, Joints, SolveResult, State};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::arm::rand::{sample_config, sample_target, ReplayToken, TargetCfg};
    pub use crate::arm::{
        classify, forward, solve, solve_pretested, Arc, ArmConfig, ConfigError, ConfigLimits,
        DerivedGeometry, Joints, Region, SolveResult, State, Workspace,
    };
    pub use crate::session::{Event, Frame, Session};
    pub use nalgebra::Vector2 as Vec2;
}
