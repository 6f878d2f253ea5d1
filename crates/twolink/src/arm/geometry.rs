use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;

use super::types::{ArmConfig, ConfigError};

/// Constants derived from an `ArmConfig`; recompute whenever the config changes.
///
/// - `(sx, sy)`: the elbow position when the shoulder sits at `a0 = π`
///   is `(-sx, sy)`; at `a0 = 0` it is `(sx, -sy)`.
/// - `phi = π/2 - beta`: turns a cartesian bearing into a shoulder angle.
/// - `r_near_sq`, `r_far_sq`: squared minimum and maximum reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedGeometry {
    pub config: ArmConfig,
    pub sx: f64,
    pub sy: f64,
    pub phi: f64,
    pub r_near_sq: f64,
    pub r_far_sq: f64,
    pub l1_sq: f64,
    pub l2_sq: f64,
}

impl DerivedGeometry {
    pub fn new(config: &ArmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ArmConfig { l1, l2, beta } = *config;
        Ok(Self {
            config: *config,
            sx: l1 * beta.sin(),
            sy: l1 * beta.cos(),
            phi: FRAC_PI_2 - beta,
            r_near_sq: (l2 - l1) * (l2 - l1),
            r_far_sq: (l2 + l1) * (l2 + l1),
            l1_sq: l1 * l1,
            l2_sq: l2 * l2,
        })
    }

    #[inline]
    pub fn l1(&self) -> f64 {
        self.config.l1
    }
    #[inline]
    pub fn l2(&self) -> f64 {
        self.config.l2
    }
    #[inline]
    pub fn beta(&self) -> f64 {
        self.config.beta
    }

    /// Baseline offset vector `(sx, sy)`.
    #[inline]
    pub fn offset(&self) -> Vector2<f64> {
        Vector2::new(self.sx, self.sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_constants_match_config() {
        let cfg = ArmConfig::from_degrees(3.0, 5.0, 30.0).unwrap();
        let g = DerivedGeometry::new(&cfg).unwrap();
        assert!((g.sx - 1.5).abs() < 1e-12);
        assert!((g.sy - 3.0 * 3f64.sqrt() / 2.0).abs() < 1e-12);
        assert!((g.phi - 60f64.to_radians()).abs() < 1e-12);
        assert_eq!(g.r_near_sq, 4.0);
        assert_eq!(g.r_far_sq, 64.0);
        assert_eq!(g.l1_sq, 9.0);
        assert_eq!(g.l2_sq, 25.0);
        // |(sx, sy)| = l1
        assert!((g.offset().norm() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn equal_links_have_zero_inner_radius() {
        let g = DerivedGeometry::new(&ArmConfig::new(2.0, 2.0, 0.0).unwrap()).unwrap();
        assert_eq!(g.r_near_sq, 0.0);
    }

    #[test]
    fn rejects_non_positive_links() {
        let bad = ArmConfig {
            l1: 0.0,
            l2: 1.0,
            beta: 0.0,
        };
        assert_eq!(
            DerivedGeometry::new(&bad),
            Err(ConfigError::InvalidConfiguration {
                field: "l1",
                value: 0.0
            })
        );
        assert!(ArmConfig::new(1.0, -2.0, 0.0).is_err());
        assert!(ArmConfig::new(f64::NAN, 1.0, 0.0).is_err());
        assert!(ArmConfig::new(1.0, 1.0, f64::INFINITY).is_err());
    }
}
