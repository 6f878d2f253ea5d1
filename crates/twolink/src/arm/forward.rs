use nalgebra::Vector2;

use super::geometry::DerivedGeometry;
use super::types::Joints;

/// Forward kinematics: joint angles to elbow and end-effector positions.
///
/// Angle zero points along −y and angles grow clockwise:
/// `elbow = l1·(sin θ, −cos θ)` with `θ = a0 + beta`, and the forearm
/// adds `−l2·(sin(θ + a1), −cos(θ + a1))`. So `a1 = π` is fully
/// extended and `a1 = 0` fully folded.
pub fn forward(g: &DerivedGeometry, a0: f64, a1: f64) -> Joints {
    let theta = a0 + g.beta();
    let elbow = Vector2::new(g.l1() * theta.sin(), -g.l1() * theta.cos());
    let theta2 = theta + a1;
    let forearm = Vector2::new(g.l2() * theta2.sin(), -g.l2() * theta2.cos());
    Joints {
        elbow,
        end_effector: elbow - forearm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::ArmConfig;
    use std::f64::consts::PI;

    #[test]
    fn extended_and_folded_postures() {
        let cfg = ArmConfig::new(2.0, 3.0, 0.0).unwrap();
        let g = DerivedGeometry::new(&cfg).unwrap();
        // a0 = 0, beta = 0: first link points straight down.
        let j = forward(&g, 0.0, PI);
        assert!((j.elbow - Vector2::new(0.0, -2.0)).norm() < 1e-12);
        assert!((j.end_effector - Vector2::new(0.0, -5.0)).norm() < 1e-12);
        // Folded: forearm doubles back past the shoulder.
        let j = forward(&g, 0.0, 0.0);
        assert!((j.end_effector - Vector2::new(0.0, 1.0)).norm() < 1e-12);
        // a0 = π/2 points the first link along +x.
        let j = forward(&g, PI / 2.0, PI);
        assert!((j.elbow - Vector2::new(2.0, 0.0)).norm() < 1e-12);
        assert!((j.end_effector - Vector2::new(5.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn link_lengths_are_preserved() {
        let cfg = ArmConfig::from_degrees(4.5, 8.5, 15.0).unwrap();
        let g = DerivedGeometry::new(&cfg).unwrap();
        for k in 0..=10 {
            let a0 = PI * k as f64 / 10.0;
            let a1 = PI * (10 - k) as f64 / 10.0;
            let j = forward(&g, a0, a1);
            assert!((j.elbow.norm() - 4.5).abs() < 1e-12);
            assert!(((j.end_effector - j.elbow).norm() - 8.5).abs() < 1e-12);
        }
    }
}
