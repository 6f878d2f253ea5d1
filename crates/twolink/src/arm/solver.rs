//! Cascade solver: reachability case analysis with joint-limit fallbacks.
//!
//! - `solve`: total over all finite targets; every exit lands in `[0, π]²`.
//! - `solve_pretested`: same results, with the half-plane region test as a
//!   shortcut to the exact branch.
//!
//! Case analysis (with `rr = x² + y²`)
//! - `rr == 0`: folded posture `(π, 0)`, the limit of the near family.
//! - `rr > (l1+l2)²`: extend towards the target bearing (`Far`/`FarAlt`).
//! - `rr < (l2-l1)²`: shoulder at π, forearm at the target (`Near`).
//! - otherwise: two-circle intersection (`Simple`), falling back to the
//!   alternate pivot (`FarAlt`) or the near family (`NearAlt`/`NearFallback`)
//!   when the shoulder angle leaves `[0, π]`.
//!
//! Elbow angles from `atan2` are wrapped into `(-π, π]` before their sign
//! test. The annulus shoulder angle keeps its raw value for routing; a
//! `2π` representative replaces it only when that lands inside `[0, π]`.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

use super::cfg::LIMIT_SLACK;
use super::geometry::DerivedGeometry;
use super::types::{SolveResult, State};
use super::workspace::{classify, Region};

/// Solve for joint angles that bring the end effector to (or towards) `target`.
pub fn solve(g: &DerivedGeometry, target: Vector2<f64>) -> SolveResult {
    let (a0, a1, state) = cascade(g, target.x, target.y);
    finish(a0, a1, state)
}

/// `solve` with the region classifier as a pre-test for the exact branch.
///
/// Bit-identical to `solve`: a `Reachable` annulus target evaluates the
/// same closed form, everything else defers to the cascade.
pub fn solve_pretested(g: &DerivedGeometry, target: Vector2<f64>) -> SolveResult {
    let (x, y) = (target.x, target.y);
    let rr = x * x + y * y;
    if rr > 0.0
        && rr >= g.r_near_sq
        && rr <= g.r_far_sq
        && classify(g, target) == Region::Reachable
    {
        let a0 = shoulder_closed_form(g, x, y, rr);
        if (0.0..=PI).contains(&a0) {
            return finish(a0, elbow_closed_form(g, rr), State::Simple);
        }
    }
    solve(g, target)
}

fn cascade(g: &DerivedGeometry, x: f64, y: f64) -> (f64, f64, State) {
    debug_assert!(!x.is_nan() && !y.is_nan(), "target must not be NaN");
    let rr = x * x + y * y;
    if rr == 0.0 {
        // Also covers l1 == l2, where the annulus formula would divide by r = 0.
        return (PI, 0.0, State::Near);
    }
    if rr > g.r_far_sq {
        return far(g, x, y);
    }
    if rr < g.r_near_sq {
        return near_family(g, x, y, State::Near);
    }
    annulus(g, x, y, rr)
}

fn far(g: &DerivedGeometry, x: f64, y: f64) -> (f64, f64, State) {
    let a0 = y.atan2(x) + g.phi;
    if a0 < 0.0 {
        return match alt_pivot(g, x, y) {
            Some(a1) => (0.0, a1, State::FarAlt),
            None => near_family(g, x, y, State::NearFallback),
        };
    }
    (a0.min(PI), PI, State::Far)
}

fn annulus(g: &DerivedGeometry, x: f64, y: f64, rr: f64) -> (f64, f64, State) {
    let a0 = shoulder_closed_form(g, x, y, rr);
    if a0 < 0.0 {
        return match alt_pivot(g, x, y) {
            Some(a1) => (0.0, a1, State::FarAlt),
            None => near_family(g, x, y, State::NearFallback),
        };
    }
    if a0 > PI {
        return near_family(g, x, y, State::NearAlt);
    }
    (a0, elbow_closed_form(g, rr), State::Simple)
}

/// Shoulder at π; the forearm points from the elbow `(-sx, sy)` at the target.
/// Folds the arm along the target bearing when that elbow angle is negative.
fn near_family(g: &DerivedGeometry, x: f64, y: f64, state: State) -> (f64, f64, State) {
    let a1 = wrap_pi((y - g.sy).atan2(x + g.sx) + g.phi);
    if a1 >= 0.0 {
        return (PI, a1, state);
    }
    let a0 = y.atan2(x) + g.phi;
    let a0 = if (0.0..=PI).contains(&a0) {
        a0
    } else {
        a0.rem_euclid(PI)
    };
    (a0, 0.0, State::NearFallback)
}

/// Elbow angle with the shoulder at 0, pivoting about `(sx, -sy)`.
fn alt_pivot(g: &DerivedGeometry, x: f64, y: f64) -> Option<f64> {
    let a1 = wrap_pi((-y - g.sy).atan2(-x + g.sx) + g.phi);
    (a1 >= 0.0).then_some(a1)
}

/// Shoulder angle of the two-circle intersection.
///
/// The raw angle decides the fallback route. Its `±2π` representative is
/// used only when it is an exact solution inside `[0, π]`.
#[inline]
fn shoulder_closed_form(g: &DerivedGeometry, x: f64, y: f64, rr: f64) -> f64 {
    let r = rr.sqrt();
    let cos_a = (g.l1_sq + rr - g.l2_sq) / (2.0 * g.l1() * r);
    let raw = clamped_acos(cos_a) + x.atan2(-y) - g.beta();
    if (0.0..=PI).contains(&raw) {
        return raw;
    }
    [raw + TAU, raw - TAU]
        .into_iter()
        .find(|a| (0.0..=PI).contains(a))
        .unwrap_or(raw)
}

#[inline]
fn elbow_closed_form(g: &DerivedGeometry, rr: f64) -> f64 {
    clamped_acos((g.l1_sq + g.l2_sq - rr) / (2.0 * g.l1() * g.l2()))
}

/// `acos` with its argument clamped to `[-1, 1]` (rounding at the reach circles).
#[inline]
fn clamped_acos(v: f64) -> f64 {
    v.clamp(-1.0, 1.0).acos()
}

/// Wrap an angle into `(-π, π]`.
#[inline]
pub(crate) fn wrap_pi(a: f64) -> f64 {
    if a > -PI && a <= PI {
        return a;
    }
    let w = (a + PI).rem_euclid(TAU) - PI;
    if w <= -PI {
        PI
    } else {
        w
    }
}

/// Single exit: check the joint-limit post-condition and absorb rounding residue.
fn finish(a0: f64, a1: f64, state: State) -> SolveResult {
    debug_assert!(
        (-LIMIT_SLACK..=PI + LIMIT_SLACK).contains(&a0),
        "shoulder angle {a0} outside [0, π] ({state:?})"
    );
    debug_assert!(
        (-LIMIT_SLACK..=PI + LIMIT_SLACK).contains(&a1),
        "elbow angle {a1} outside [0, π] ({state:?})"
    );
    SolveResult {
        a0: a0.clamp(0.0, PI),
        a1: a1.clamp(0.0, PI),
        state,
    }
}
