//! Reachable region of the joint-limited arm (`a0, a1 ∈ [0, π]`).
//!
//! Purpose
//! - `classify`: constant-time region test from two half-plane and circle
//!   predicates, no trigonometry.
//! - `Workspace`: the region boundary as four circular arcs, for overlays.
//!
//! Model
//! - The baseline line `x·sy = -sx·y` splits the plane. On the forward side
//!   the region is bounded by the outer circle `r = l1 + l2` and the elbow
//!   circle around `(-sx, sy)` (shoulder at π); on the back side by the
//!   inner circle `r = |l2 - l1|` and the elbow circle around `(sx, -sy)`
//!   (shoulder at 0).

use std::f64::consts::{FRAC_PI_2, TAU};

use nalgebra::Vector2;

use super::geometry::DerivedGeometry;

/// Position of a target relative to the reachable region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Reachable exactly within joint limits.
    Reachable,
    /// Forward side, inside the elbow circle of the π pivot.
    Close,
    /// Beyond maximum reach, or back side above the x-axis outside the 0 pivot.
    Distant,
    /// Back side below the x-axis, outside the elbow circle of the 0 pivot.
    Behind,
    /// Back side, inside minimum reach.
    Folded,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Reachable => "reachable",
            Region::Close => "close",
            Region::Distant => "distant",
            Region::Behind => "behind",
            Region::Folded => "folded",
        }
    }
}

/// Classify `target` against the reachable region.
pub fn classify(g: &DerivedGeometry, target: Vector2<f64>) -> Region {
    let (x, y) = (target.x, target.y);
    let rr = x * x + y * y;
    // |p ∓ (sx, -sy)|² compared with l2², expanded around the origin.
    let c = g.l2_sq - g.l1_sq;
    if x * g.sy >= -g.sx * y {
        if rr > g.r_far_sq {
            Region::Distant
        } else if x * (x + 2.0 * g.sx) + y * (y - 2.0 * g.sy) >= c {
            Region::Reachable
        } else {
            Region::Close
        }
    } else if rr < g.r_near_sq {
        Region::Folded
    } else if x * (x - 2.0 * g.sx) + y * (y + 2.0 * g.sy) <= c {
        Region::Reachable
    } else if y > 0.0 {
        Region::Distant
    } else {
        Region::Behind
    }
}

/// Circular arc swept from `start` to `end` (radians, arm frame).
/// `ccw` sweeps with increasing angle, otherwise decreasing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub center: Vector2<f64>,
    pub radius: f64,
    pub start: f64,
    pub end: f64,
    pub ccw: bool,
}

impl Arc {
    #[inline]
    pub fn point_at(&self, angle: f64) -> Vector2<f64> {
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }

    /// Signed swept angle in `(-2π, 2π)`; positive when `ccw`.
    pub fn sweep(&self) -> f64 {
        if self.ccw {
            (self.end - self.start).rem_euclid(TAU)
        } else {
            -(self.start - self.end).rem_euclid(TAU)
        }
    }

    pub fn start_point(&self) -> Vector2<f64> {
        self.point_at(self.start)
    }

    pub fn end_point(&self) -> Vector2<f64> {
        self.point_at(self.start + self.sweep())
    }

    /// `n + 1` evenly spaced points from start to end (n ≥ 1).
    pub fn polyline(&self, n: usize) -> Vec<Vector2<f64>> {
        let n = n.max(1);
        let sweep = self.sweep();
        (0..=n)
            .map(|k| self.point_at(self.start + sweep * (k as f64) / (n as f64)))
            .collect()
    }
}

/// Boundary of the reachable region for one configuration.
#[derive(Clone, Copy, Debug)]
pub struct Workspace {
    pub geometry: DerivedGeometry,
    /// Outer arc, π-pivot elbow arc, inner arc, 0-pivot elbow arc.
    pub arcs: [Arc; 4],
}

impl Workspace {
    pub fn new(g: &DerivedGeometry) -> Self {
        Self {
            geometry: *g,
            arcs: Self::boundary(g),
        }
    }

    /// The four boundary arcs in drawing order. For `l2 >= l1` they chain
    /// end-to-start into a closed curve.
    pub fn boundary(g: &DerivedGeometry) -> [Arc; 4] {
        let beta = g.beta();
        let lo = -FRAC_PI_2 + beta;
        let hi = FRAC_PI_2 + beta;
        [
            Arc {
                center: Vector2::zeros(),
                radius: g.l1() + g.l2(),
                start: lo,
                end: hi,
                ccw: true,
            },
            Arc {
                center: Vector2::new(-g.sx, g.sy),
                radius: g.l2(),
                start: hi,
                end: lo,
                ccw: false,
            },
            Arc {
                center: Vector2::zeros(),
                radius: (g.l2() - g.l1()).abs(),
                start: lo,
                end: hi,
                ccw: false,
            },
            Arc {
                center: Vector2::new(g.sx, -g.sy),
                radius: g.l2(),
                start: hi,
                end: lo,
                ccw: true,
            },
        ]
    }

    #[inline]
    pub fn contains(&self, target: Vector2<f64>) -> bool {
        classify(&self.geometry, target) == Region::Reachable
    }

    /// Closed polyline through all four arcs, `n` segments per arc.
    pub fn outline(&self, n: usize) -> Vec<Vector2<f64>> {
        let mut pts = Vec::with_capacity(4 * (n.max(1) + 1));
        for arc in &self.arcs {
            pts.extend(arc.polyline(n));
        }
        pts
    }
}
