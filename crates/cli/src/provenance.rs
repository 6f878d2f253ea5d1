use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;
use twolink::ArmConfig;

/// Metadata recorded next to every table the CLI writes.
pub struct Payload {
    pub config: ArmConfig,
    pub params: Value,
}

impl Payload {
    pub fn new(config: ArmConfig, params: Value) -> Self {
        Self { config, params }
    }
}

/// Arm configuration as a JSON object (angles in degrees).
pub fn config_json(config: &ArmConfig) -> Value {
    json!({
        "l1": config.l1,
        "l2": config.l2,
        "beta_deg": config.beta_deg(),
    })
}

/// Write `<artifact>.provenance.json` with the commit, callsite, arm config, params and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "version": twolink::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "config": config_json(&payload.config),
        "params": payload.params,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return from_env.to_string();
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_table() {
        let derived = provenance_path(Path::new("/tmp/out/sweep.csv"));
        assert_eq!(derived, Path::new("/tmp/out/sweep.provenance.json"));
    }

    #[test]
    fn sidecar_records_config_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested").join("track.csv");
        let cfg = ArmConfig::from_degrees(3.0, 5.0, -30.0).unwrap();
        let prov_path = write_sidecar(&artifact, Payload::new(cfg, json!({"seed": 4}))).unwrap();
        assert!(prov_path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["seed"], 4);
        assert_eq!(parsed["config"]["l2"], 5.0);
        assert!((parsed["config"]["beta_deg"].as_f64().unwrap() + 30.0).abs() < 1e-9);
    }
}
