//! Screen ↔ arm frame conversion for pointer input.
//!
//! The arm origin sits at the integer centre of the canvas, the y-axis is
//! flipped, and `zoom` scales centimetres to CSS pixels (96 px per inch).

use anyhow::{ensure, Result};
use nalgebra::Vector2;

/// CSS pixels per centimetre.
pub const PX_PER_CM: f64 = 96.0 / 2.54;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub zoom: f64,
}

impl Viewport {
    /// Rejects a zoom that would divide pointer offsets by zero or NaN.
    pub fn new(width: u32, height: u32, zoom: f64) -> Result<Self> {
        ensure!(
            zoom.is_finite() && zoom > 0.0,
            "zoom must be finite and positive, got {zoom}"
        );
        Ok(Self {
            width,
            height,
            zoom,
        })
    }

    /// Canvas pixel of the arm origin.
    #[inline]
    pub fn origin(&self) -> (f64, f64) {
        ((self.width / 2) as f64, (self.height / 2) as f64)
    }

    /// Pixels per arm length unit.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.zoom * PX_PER_CM
    }

    pub fn to_arm(&self, px: f64, py: f64) -> Vector2<f64> {
        let (ox, oy) = self.origin();
        let s = self.scale();
        Vector2::new((px - ox) / s, -(py - oy) / s)
    }

    pub fn to_screen(&self, p: Vector2<f64>) -> (f64, f64) {
        let (ox, oy) = self.origin();
        let s = self.scale();
        (ox + p.x * s, oy - p.y * s)
    }
}
