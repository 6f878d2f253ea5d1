mod provenance;
mod table;
mod throttle;
mod viewport;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::Vector2;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;
use twolink::arm::rand::{sample_target, ReplayToken, TargetCfg};
use twolink::arm::{ArmConfig, ConfigLimits, DerivedGeometry, Workspace};
use twolink::session::{Event, Session};

use provenance::{config_json, write_sidecar, Payload};
use table::{PointerSample, SolveRow};
use throttle::Throttle;
use viewport::Viewport;

#[derive(Parser)]
#[command(name = "twolink")]
#[command(about = "Closed-form two-link arm solver: single targets, sweeps and pointer replays")]
struct Cmd {
    /// Upper link length
    #[arg(long, global = true, default_value_t = 4.5)]
    l1: f64,
    /// Lower link length
    #[arg(long, global = true, default_value_t = 8.5)]
    l2: f64,
    /// Baseline angle in degrees
    #[arg(long, global = true, default_value_t = 15.0, allow_negative_numbers = true)]
    beta: f64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve one target and print the posture as JSON
    Solve {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Print the reachable-region boundary arcs as JSON
    Region {
        /// Points per arc in the outline polyline
        #[arg(long, default_value_t = 16)]
        samples: usize,
    },
    /// Solve seeded random targets and write a table (CSV, or Parquet for .parquet)
    Sweep {
        #[arg(long, default_value_t = 1000)]
        count: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Sampling disc radius as a multiple of the maximum reach
        #[arg(long, default_value_t = 1.5)]
        scale: f64,
        /// Fraction of targets placed on the reach circles
        #[arg(long, default_value_t = 0.0)]
        boundary_frac: f64,
        #[arg(long)]
        out: String,
    },
    /// Replay a pointer trace (CSV t_ms,px,py) through the throttle and solver
    Track {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        #[arg(long, default_value_t = 1000)]
        width: u32,
        #[arg(long, default_value_t = 1000)]
        height: u32,
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
        /// Maximum solve rate
        #[arg(long, default_value_t = 35.0)]
        hz: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let config = ArmConfig::from_degrees(cmd.l1, cmd.l2, cmd.beta)
        .context("arm configuration from --l1/--l2/--beta")?;
    if !ConfigLimits::default().contains(&config) {
        tracing::warn!(
            l1 = config.l1,
            l2 = config.l2,
            beta_deg = config.beta_deg(),
            "configuration outside the supported limits"
        );
    }
    match cmd.action {
        Action::Solve { x, y } => solve(config, Vector2::new(x, y)),
        Action::Region { samples } => region(config, samples),
        Action::Sweep {
            count,
            seed,
            scale,
            boundary_frac,
            out,
        } => sweep(
            config,
            count,
            seed,
            TargetCfg {
                scale,
                boundary_frac,
            },
            out,
        ),
        Action::Track {
            input,
            out,
            width,
            height,
            zoom,
            hz,
        } => track(
            config,
            input,
            out,
            Viewport::new(width, height, zoom)?,
            hz,
        ),
        Action::Report => report(config),
    }
}

fn solve(config: ArmConfig, target: Vector2<f64>) -> Result<()> {
    let g = DerivedGeometry::new(&config)?;
    let row = SolveRow::new(&g, target);
    tracing::info!(state = row.state, region = row.region, "solve");
    let obj = json!({
        "config": config_json(&config),
        "solution": row,
        "a0_deg": row.a0.to_degrees(),
        "a1_deg": row.a1.to_degrees(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn region(config: ArmConfig, samples: usize) -> Result<()> {
    let g = DerivedGeometry::new(&config)?;
    let ws = Workspace::new(&g);
    let arcs: Vec<_> = ws
        .arcs
        .iter()
        .map(|a| {
            json!({
                "center": [a.center.x, a.center.y],
                "radius": a.radius,
                "start": a.start,
                "end": a.end,
                "ccw": a.ccw,
            })
        })
        .collect();
    let outline: Vec<[f64; 2]> = ws.outline(samples).iter().map(|p| [p.x, p.y]).collect();
    let obj = json!({
        "config": config_json(&config),
        "min_reach": config.min_reach(),
        "max_reach": config.max_reach(),
        "arcs": arcs,
        "outline": outline,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn sweep(config: ArmConfig, count: u64, seed: u64, cfg: TargetCfg, out: String) -> Result<()> {
    tracing::info!(count, seed, scale = cfg.scale, out, "sweep");
    let g = DerivedGeometry::new(&config)?;
    let rows: Vec<SolveRow> = (0..count)
        .map(|i| SolveRow::new(&g, sample_target(&g, cfg, ReplayToken::new(seed, i))))
        .collect();

    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for r in &rows {
        *counts.entry(r.state).or_default() += 1;
    }
    for (state, n) in &counts {
        tracing::info!(state, n, "sweep_state_count");
    }

    let out_path = Path::new(&out);
    let mut df = table::rows_frame(&rows)?;
    table::write_table(out_path, &mut df)?;
    write_sidecar(
        out_path,
        Payload::new(
            config,
            json!({
                "command": "sweep",
                "count": count,
                "seed": seed,
                "scale": cfg.scale,
                "boundary_frac": cfg.boundary_frac,
                "state_counts": counts,
            }),
        ),
    )?;
    Ok(())
}

fn track(config: ArmConfig, input: String, out: String, vp: Viewport, hz: f64) -> Result<()> {
    tracing::info!(input, out, hz, "track");
    let trace = table::read_trace(Path::new(&input))?;
    let mut session = Session::new(config)?;
    let mut throttle = Throttle::from_hz(hz)?;

    let mut emitted: Vec<(f64, PointerSample)> = Vec::new();
    for sample in &trace {
        let fired = throttle.offer(sample.t_ms, *sample);
        if fired.is_empty() {
            tracing::debug!(t_ms = sample.t_ms, "pointer_event_throttled");
        }
        emitted.extend(fired);
    }
    emitted.extend(throttle.finish());

    let mut frames = Vec::with_capacity(emitted.len());
    for (t_ms, sample) in emitted {
        let target = vp.to_arm(sample.px, sample.py);
        let frame = session.apply(Event::Target(target))?;
        frames.push((PointerSample { t_ms, ..sample }, SolveRow::from_frame(frame)));
    }
    tracing::info!(
        samples = trace.len(),
        frames = frames.len(),
        coalesced = throttle.coalesced(),
        interval_ms = throttle.interval(),
        "track_done"
    );

    let out_path = Path::new(&out);
    let mut df = table::track_frame(&frames)?;
    table::write_table(out_path, &mut df)?;
    write_sidecar(
        out_path,
        Payload::new(
            config,
            json!({
                "command": "track",
                "input": input,
                "viewport": {"width": vp.width, "height": vp.height, "zoom": vp.zoom},
                "hz": hz,
                "interval_ms": throttle.interval(),
            }),
        ),
    )?;
    Ok(())
}

fn report(config: ArmConfig) -> Result<()> {
    let g = DerivedGeometry::new(&config)?;
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": twolink::VERSION,
        "config": config_json(&config),
        "within_limits": ConfigLimits::default().contains(&config),
        "derived": {
            "sx": g.sx,
            "sy": g.sy,
            "phi": g.phi,
            "r_near_sq": g.r_near_sq,
            "r_far_sq": g.r_far_sq,
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
