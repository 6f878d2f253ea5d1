//! PyO3 bindings for the `twolink` solver.
//!
//! Notes
//! - Configurations are passed flat as `(l1, l2, beta_deg)` and validated on
//!   every call; invalid ones raise `ValueError`.
//! - Points and angle pairs cross the boundary as plain tuples.

mod common;

use nalgebra::Vector2;
use pyo3::prelude::*;

use common::geometry_from_py;

/// Solve for the target `(x, y)`; returns `(a0, a1, state)` with angles in radians.
#[pyfunction]
fn solve(l1: f64, l2: f64, beta_deg: f64, x: f64, y: f64) -> PyResult<(f64, f64, &'static str)> {
    let g = geometry_from_py(l1, l2, beta_deg)?;
    let res = twolink::arm::solve(&g, Vector2::new(x, y));
    Ok((res.a0, res.a1, res.state.as_str()))
}

/// Elbow and end-effector positions for the joint angles `(a0, a1)`.
#[pyfunction]
fn forward(
    l1: f64,
    l2: f64,
    beta_deg: f64,
    a0: f64,
    a1: f64,
) -> PyResult<((f64, f64), (f64, f64))> {
    let g = geometry_from_py(l1, l2, beta_deg)?;
    let j = twolink::arm::forward(&g, a0, a1);
    Ok((
        (j.elbow.x, j.elbow.y),
        (j.end_effector.x, j.end_effector.y),
    ))
}

/// Region label of `(x, y)`: "reachable", "close", "distant", "behind" or "folded".
#[pyfunction]
fn classify(l1: f64, l2: f64, beta_deg: f64, x: f64, y: f64) -> PyResult<&'static str> {
    let g = geometry_from_py(l1, l2, beta_deg)?;
    Ok(twolink::arm::classify(&g, Vector2::new(x, y)).as_str())
}

#[pymodule]
fn twolink_native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", twolink::VERSION)?;
    m.add_function(wrap_pyfunction!(solve, m)?)?;
    m.add_function(wrap_pyfunction!(forward, m)?)?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    Ok(())
}
