//! Event boundary between an interactive front end and the solver.
//!
//! A `Session` owns the current configuration, its derived geometry and the
//! current target. Each `Event` is applied synchronously and yields a fresh
//! `Frame` for the renderer. Rate limiting happens upstream.

use nalgebra::Vector2;

use crate::arm::{
    classify, forward, solve, ArmConfig, ConfigError, DerivedGeometry, Joints, Region,
    SolveResult,
};

/// Input accepted by a `Session`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// New target in the arm frame.
    Target(Vector2<f64>),
    /// Replace the configuration; the current target is re-solved.
    Config(ArmConfig),
}

/// Everything a renderer needs for one redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub target: Vector2<f64>,
    pub solution: SolveResult,
    pub joints: Joints,
    pub region: Region,
}

#[derive(Clone, Debug)]
pub struct Session {
    geometry: DerivedGeometry,
    target: Vector2<f64>,
    frame: Frame,
}

impl Session {
    /// Start with the target at the origin.
    pub fn new(config: ArmConfig) -> Result<Self, ConfigError> {
        let geometry = DerivedGeometry::new(&config)?;
        let target = Vector2::zeros();
        Ok(Self {
            geometry,
            target,
            frame: compute(&geometry, target),
        })
    }

    #[inline]
    pub fn config(&self) -> &ArmConfig {
        &self.geometry.config
    }

    #[inline]
    pub fn geometry(&self) -> &DerivedGeometry {
        &self.geometry
    }

    #[inline]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Apply one event. A rejected configuration leaves the session unchanged.
    pub fn apply(&mut self, event: Event) -> Result<&Frame, ConfigError> {
        match event {
            Event::Target(target) => self.target = target,
            Event::Config(config) => self.geometry = DerivedGeometry::new(&config)?,
        }
        self.frame = compute(&self.geometry, self.target);
        Ok(&self.frame)
    }
}

fn compute(g: &DerivedGeometry, target: Vector2<f64>) -> Frame {
    let solution = solve(g, target);
    Frame {
        target,
        solution,
        joints: forward(g, solution.a0, solution.a1),
        region: classify(g, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::State;
    use std::f64::consts::PI;

    #[test]
    fn starts_folded_at_origin() {
        let s = Session::new(ArmConfig::default()).unwrap();
        assert_eq!(s.frame().solution.state, State::Near);
        assert_eq!(s.frame().solution.a0, PI);
        assert_eq!(s.frame().target, Vector2::zeros());
    }

    #[test]
    fn target_then_config_resolves() {
        let mut s = Session::new(ArmConfig::default()).unwrap();
        let f = *s.apply(Event::Target(Vector2::new(8.0, 2.0))).unwrap();
        assert_eq!(f.solution.state, State::Simple);
        assert!((f.joints.end_effector - f.target).norm() < 1e-9);

        // Shrinking the arm pushes the same target out of reach.
        let short = ArmConfig::from_degrees(2.0, 3.0, 15.0).unwrap();
        let f = *s.apply(Event::Config(short)).unwrap();
        assert_eq!(f.target, Vector2::new(8.0, 2.0));
        assert_eq!(f.solution.state, State::Far);
        assert_eq!(s.config(), &short);
        assert_eq!(s.geometry().r_far_sq, 25.0);
    }

    #[test]
    fn rejected_config_keeps_state() {
        let mut s = Session::new(ArmConfig::default()).unwrap();
        s.apply(Event::Target(Vector2::new(8.0, 2.0))).unwrap();
        let before = *s.frame();
        let bad = ArmConfig {
            l1: -1.0,
            l2: 2.0,
            beta: 0.0,
        };
        assert!(s.apply(Event::Config(bad)).is_err());
        assert_eq!(*s.frame(), before);
        assert_eq!(s.config(), &ArmConfig::default());
    }
}
