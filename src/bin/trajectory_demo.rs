use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trapezoid_core::control::ControlStack;
use trapezoid_core::{Point3, TrajectoryCore};

/// Plan a straight-line trapezoidal move and play it back
#[derive(Parser, Debug)]
#[command(name = "trajectory_demo")]
struct Cli {
    /// Start point as x,y,z
    #[arg(long, value_parser = parse_point, default_value = "0,0,0")]
    start: Point3,

    /// End point as x,y,z
    #[arg(long, value_parser = parse_point, default_value = "0,5,0")]
    end: Point3,

    #[arg(long, default_value_t = 1.0)]
    acceleration: f64,

    #[arg(long, default_value_t = 1.0)]
    deceleration: f64,

    #[arg(long, default_value_t = 1.0)]
    max_speed: f64,

    /// Seconds between samples
    #[arg(long, default_value_t = 0.05)]
    step_duration: f64,

    /// Significance threshold for the scalar parameters
    #[arg(long)]
    epsilon: Option<f64>,

    /// Playback speed multiplier
    #[arg(long, default_value_t = 1.0)]
    rate: f64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_point(s: &str) -> Result<Point3, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("{}: {}", c, e)))
        .collect::<Result<Vec<_>, _>>()?;
    match coords.as_slice() {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z but got {} components", coords.len())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut params = HashMap::new();
    params.insert("acceleration".to_string(), cli.acceleration);
    params.insert("deceleration".to_string(), cli.deceleration);
    params.insert("max_speed".to_string(), cli.max_speed);
    params.insert("step_duration".to_string(), cli.step_duration);
    if let Some(epsilon) = cli.epsilon {
        params.insert("epsilon".to_string(), epsilon);
    }

    let mut control = ControlStack::new(cli.start, cli.end);
    control
        .configure(&params)
        .context("Failed to configure control stack")?;

    let mut core = TrajectoryCore::new();
    core.register(control);
    core.init().context("Failed to initialize core")?;

    let control = core
        .control_stack_mut()
        .context("Control stack not registered")?;

    if control.path().is_empty() {
        info!("No trajectory for the given parameters");
    } else {
        info!(
            "Playing {} points from {:?} to {:?}",
            control.path().len(),
            cli.start,
            cli.end
        );

        let rate = if cli.rate.is_finite() && cli.rate > 0.0 { cli.rate } else { 1.0 };
        let tick = Duration::try_from_secs_f64(cli.step_duration / rate)
            .context("Step duration too long for playback")?
            .max(Duration::from_millis(1));
        let mut interval = tokio::time::interval(tick);
        let mut last = tokio::time::Instant::now();

        while !control.is_finished() {
            interval.tick().await;
            let now = tokio::time::Instant::now();
            let delta = (now - last).as_secs_f64() * rate;
            last = now;

            if let Some(position) = control.update(delta) {
                info!("position={:?}", position);
            }
        }
    }

    core.shutdown().context("Failed to shutdown core")?;
    Ok(())
}
