use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use twolink::arm::{ArmConfig, ConfigError, DerivedGeometry};

/// Validate `(l1, l2, beta_deg)` and derive the geometry, mapping failures to `ValueError`.
pub fn geometry_from_py(l1: f64, l2: f64, beta_deg: f64) -> PyResult<DerivedGeometry> {
    let config = ArmConfig::from_degrees(l1, l2, beta_deg).map_err(map_config_err)?;
    DerivedGeometry::new(&config).map_err(map_config_err)
}

pub fn map_config_err(err: ConfigError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
