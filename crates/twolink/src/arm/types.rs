//! Value types shared by the solver, forward kinematics and the workspace.
//!
//! - `ArmConfig`: link lengths and baseline angle; validated on construction.
//! - `ConfigLimits`: the ranges an interactive panel offers (soft limits).
//! - `SolveResult`, `State`: joint angles plus the branch that produced them.
//! - `Joints`: cartesian elbow and end-effector positions.

use std::f64::consts::PI;
use std::fmt;

use nalgebra::Vector2;

/// Rejected arm configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A link length is not strictly positive, or a field is not finite.
    InvalidConfiguration { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { field, value } => {
                write!(f, "invalid arm configuration: {field} = {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Planar two-link arm: link lengths `l1`, `l2` and baseline angle `beta` (radians).
///
/// Invariants (checked by `new`/`validate`):
/// - `l1 > 0` and `l2 > 0`, both finite.
/// - `beta` finite. The recommended domain is `[-π/2, π/2]`; other values
///   are accepted and still solve to in-range angles.
/// - `l1 == l2` is legal (zero minimum reach).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmConfig {
    pub l1: f64,
    pub l2: f64,
    pub beta: f64,
}

impl ArmConfig {
    pub fn new(l1: f64, l2: f64, beta: f64) -> Result<Self, ConfigError> {
        let cfg = Self { l1, l2, beta };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Same as `new` with `beta` given in degrees.
    pub fn from_degrees(l1: f64, l2: f64, beta_deg: f64) -> Result<Self, ConfigError> {
        Self::new(l1, l2, beta_deg.to_radians())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("l1", self.l1), ("l2", self.l2)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidConfiguration { field, value });
            }
        }
        if !self.beta.is_finite() {
            return Err(ConfigError::InvalidConfiguration {
                field: "beta",
                value: self.beta,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn beta_deg(&self) -> f64 {
        self.beta.to_degrees()
    }

    /// Maximum reach `l1 + l2`.
    #[inline]
    pub fn max_reach(&self) -> f64 {
        self.l1 + self.l2
    }

    /// Minimum reach `|l2 - l1|`.
    #[inline]
    pub fn min_reach(&self) -> f64 {
        (self.l2 - self.l1).abs()
    }
}

impl Default for ArmConfig {
    /// Demo preset: 4.5 / 8.5 length units, 15° baseline.
    fn default() -> Self {
        Self {
            l1: 4.5,
            l2: 8.5,
            beta: 15f64.to_radians(),
        }
    }
}

/// Ranges exposed by the parameter panel (lengths in units, `beta` in degrees).
///
/// These are soft limits: the core accepts any positive finite lengths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigLimits {
    pub l1: (f64, f64),
    pub l2: (f64, f64),
    pub beta_deg: (f64, f64),
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            l1: (0.1, 30.0),
            l2: (0.1, 40.0),
            beta_deg: (-90.0, 90.0),
        }
    }
}

impl ConfigLimits {
    pub fn contains(&self, cfg: &ArmConfig) -> bool {
        let within = |(lo, hi): (f64, f64), v: f64| lo <= v && v <= hi;
        let (lo, hi) = self.beta_deg;
        within(self.l1, cfg.l1)
            && within(self.l2, cfg.l2)
            && within((lo.to_radians(), hi.to_radians()), cfg.beta)
    }
}

/// Branch of the case analysis that produced a `SolveResult`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// Exact two-circle intersection within joint limits.
    Simple,
    /// Beyond maximum reach; arm fully extended towards the target bearing.
    Far,
    /// Shoulder pinned at 0, forearm pointed at the target from the alternate pivot.
    FarAlt,
    /// Inside minimum reach; shoulder at π, forearm pointed at the target.
    Near,
    /// In the annulus but the shoulder would pass π; handled like `Near`.
    NearAlt,
    /// Folded arm pointed along the target bearing.
    NearFallback,
}

impl State {
    pub const ALL: [State; 6] = [
        State::Simple,
        State::Far,
        State::FarAlt,
        State::Near,
        State::NearAlt,
        State::NearFallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            State::Simple => "simple",
            State::Far => "far",
            State::FarAlt => "far-alt",
            State::Near => "near",
            State::NearAlt => "near-alt",
            State::NearFallback => "near-fallback",
        }
    }

    /// True only when the target is reached exactly.
    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, State::Simple)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joint angles (radians, both in `[0, π]`) and the producing branch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveResult {
    pub a0: f64,
    pub a1: f64,
    pub state: State,
}

impl SolveResult {
    #[inline]
    pub fn angles(&self) -> (f64, f64) {
        (self.a0, self.a1)
    }

    #[inline]
    pub fn in_limits(&self) -> bool {
        (0.0..=PI).contains(&self.a0) && (0.0..=PI).contains(&self.a1)
    }
}

/// Cartesian joint positions in the arm frame (shoulder at the origin).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joints {
    pub elbow: Vector2<f64>,
    pub end_effector: Vector2<f64>,
}
