//! Call surface for rendering and input layers.
//!
//! Both calls take the configuration by value and validate it, so a caller
//! holding only an `ArmConfig` never touches `DerivedGeometry`. Interactive
//! loops that solve many targets per configuration should derive the
//! geometry once (see `session::Session`).

use nalgebra::Vector2;

use crate::arm::{self, ArmConfig, ConfigError, DerivedGeometry, Joints, SolveResult};

/// Joint angles for `target` (arm frame). Errors only on an invalid config.
pub fn solve(config: ArmConfig, target: Vector2<f64>) -> Result<SolveResult, ConfigError> {
    let g = DerivedGeometry::new(&config)?;
    Ok(arm::solve(&g, target))
}

/// Elbow and end-effector positions for the angle pair `(a0, a1)`.
pub fn forward(config: ArmConfig, (a0, a1): (f64, f64)) -> Result<Joints, ConfigError> {
    let g = DerivedGeometry::new(&config)?;
    Ok(arm::forward(&g, a0, a1))
}
