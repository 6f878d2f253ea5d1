//! Tabular I/O: solved rows to CSV or Parquet, pointer traces from CSV (polars).

use anyhow::{anyhow, Context, Result};
use nalgebra::Vector2;
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use twolink::arm::{classify, forward, solve, DerivedGeometry};
use twolink::session::Frame;

/// One solved target with its posture.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SolveRow {
    pub x: f64,
    pub y: f64,
    pub a0: f64,
    pub a1: f64,
    pub state: &'static str,
    pub region: &'static str,
    pub elbow_x: f64,
    pub elbow_y: f64,
    pub tip_x: f64,
    pub tip_y: f64,
}

impl SolveRow {
    pub fn new(g: &DerivedGeometry, target: Vector2<f64>) -> Self {
        let solution = solve(g, target);
        Self::from_frame(&Frame {
            target,
            solution,
            joints: forward(g, solution.a0, solution.a1),
            region: classify(g, target),
        })
    }

    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            x: frame.target.x,
            y: frame.target.y,
            a0: frame.solution.a0,
            a1: frame.solution.a1,
            state: frame.solution.state.as_str(),
            region: frame.region.as_str(),
            elbow_x: frame.joints.elbow.x,
            elbow_y: frame.joints.elbow.y,
            tip_x: frame.joints.end_effector.x,
            tip_y: frame.joints.end_effector.y,
        }
    }

    /// Distance between the target and the reached end effector.
    pub fn miss(&self) -> f64 {
        (self.tip_x - self.x).hypot(self.tip_y - self.y)
    }
}

/// Pointer sample in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub t_ms: f64,
    pub px: f64,
    pub py: f64,
}

fn col<T>(rows: &[SolveRow], f: impl Fn(&SolveRow) -> T) -> Vec<T> {
    rows.iter().map(f).collect()
}

/// Columns x, y, a0, a1, state, region, elbow_*, tip_*, miss.
pub fn rows_frame(rows: &[SolveRow]) -> PolarsResult<DataFrame> {
    df!(
        "x" => col(rows, |r| r.x),
        "y" => col(rows, |r| r.y),
        "a0" => col(rows, |r| r.a0),
        "a1" => col(rows, |r| r.a1),
        "state" => col(rows, |r| r.state),
        "region" => col(rows, |r| r.region),
        "elbow_x" => col(rows, |r| r.elbow_x),
        "elbow_y" => col(rows, |r| r.elbow_y),
        "tip_x" => col(rows, |r| r.tip_x),
        "tip_y" => col(rows, |r| r.tip_y),
        "miss" => col(rows, SolveRow::miss),
    )
}

/// Replayed pointer frames: emit time and pixel position ahead of the solved columns.
pub fn track_frame(frames: &[(PointerSample, SolveRow)]) -> PolarsResult<DataFrame> {
    let pcol = |f: fn(&PointerSample) -> f64| frames.iter().map(|(p, _)| f(p)).collect::<Vec<_>>();
    let rows: Vec<SolveRow> = frames.iter().map(|(_, r)| *r).collect();
    df!(
        "t_ms" => pcol(|p| p.t_ms),
        "px" => pcol(|p| p.px),
        "py" => pcol(|p| p.py),
        "x" => col(&rows, |r| r.x),
        "y" => col(&rows, |r| r.y),
        "a0" => col(&rows, |r| r.a0),
        "a1" => col(&rows, |r| r.a1),
        "state" => col(&rows, |r| r.state),
        "region" => col(&rows, |r| r.region),
        "elbow_x" => col(&rows, |r| r.elbow_x),
        "elbow_y" => col(&rows, |r| r.elbow_y),
        "tip_x" => col(&rows, |r| r.tip_x),
        "tip_y" => col(&rows, |r| r.tip_y),
        "miss" => col(&rows, SolveRow::miss),
    )
}

/// Write `df` as Parquet when `path` ends in `.parquet`, otherwise as CSV with a header.
pub fn write_table(path: &Path, df: &mut DataFrame) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if path.extension().is_some_and(|e| e == "parquet") {
        ParquetWriter::new(&mut file)
            .finish(df)
            .with_context(|| format!("writing {}", path.display()))?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

/// Read a pointer trace with columns `t_ms`, `px`, `py`, sorted by time.
pub fn read_trace(path: &Path) -> Result<Vec<PointerSample>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let t = f64_column(&df, "t_ms")?;
    let px = f64_column(&df, "px")?;
    let py = f64_column(&df, "py")?;
    let mut samples: Vec<PointerSample> = t
        .into_iter()
        .zip(px)
        .zip(py)
        .map(|((t_ms, px), py)| PointerSample { t_ms, px, py })
        .collect();
    samples.sort_by(|a, b| a.t_ms.total_cmp(&b.t_ms));
    Ok(samples)
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .with_context(|| format!("missing column {name}"))?
        .cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(i, v)| v.ok_or_else(|| anyhow!("null {name} at row {i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use twolink::ArmConfig;

    #[test]
    fn row_carries_solution_and_posture() {
        let g = DerivedGeometry::new(&ArmConfig::default()).unwrap();
        let row = SolveRow::new(&g, Vector2::new(8.0, 2.0));
        assert_eq!(row.state, "simple");
        assert_eq!(row.region, "reachable");
        assert!(row.miss() < 1e-9);
        let far = SolveRow::new(&g, Vector2::new(0.0, 20.0));
        assert_eq!(far.state, "far");
        assert!(far.miss() > 6.0);
    }

    #[test]
    fn trace_is_read_and_sorted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.csv");
        std::fs::write(&path, "t_ms,px,py\n20,5,6\n0,1,2\n10,3.5,4\n").unwrap();
        let trace = read_trace(&path).unwrap();
        assert_eq!(trace.len(), 3);
        assert_eq!(
            trace[0],
            PointerSample {
                t_ms: 0.0,
                px: 1.0,
                py: 2.0
            }
        );
        assert_eq!(trace[1].px, 3.5);
        assert_eq!(trace[2].t_ms, 20.0);
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "t_ms,px\n0,1\n").unwrap();
        let err = read_trace(&path).unwrap_err();
        assert!(format!("{err:#}").contains("py"));
    }

    #[test]
    fn frames_write_to_csv() {
        let g = DerivedGeometry::new(&ArmConfig::default()).unwrap();
        let frames = vec![
            (
                PointerSample {
                    t_ms: 0.0,
                    px: 10.0,
                    py: 20.0,
                },
                SolveRow::new(&g, Vector2::new(1.0, 1.0)),
            ),
            (
                PointerSample {
                    t_ms: 28.0,
                    px: 11.0,
                    py: 21.0,
                },
                SolveRow::new(&g, Vector2::new(-6.0, -6.0)),
            ),
        ];
        let mut df = track_frame(&frames).unwrap();
        assert_eq!(df.shape(), (2, 14));
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("track.csv");
        write_table(&path, &mut df).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("t_ms,px,py,x,y,a0,a1,state,region"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn parquet_extension_selects_parquet() {
        let g = DerivedGeometry::new(&ArmConfig::default()).unwrap();
        let rows: Vec<SolveRow> = [(8.0, 2.0), (0.0, 20.0), (0.0, 10.0)]
            .iter()
            .map(|&(x, y)| SolveRow::new(&g, Vector2::new(x, y)))
            .collect();
        let mut df = rows_frame(&rows).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.parquet");
        write_table(&path, &mut df).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"PAR1");
    }
}
