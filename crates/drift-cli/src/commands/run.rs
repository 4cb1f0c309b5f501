//! Wall-clock benchmark run

use super::load_config;
use crate::headless::HeadlessRenderer;
use anyhow::{bail, Context, Result};
use drift_core::BenchConfig;
use drift_particles::Simulation;
use drift_runtime::{
    BenchHarness, CloseSignal, HarnessConfig, NeverClose, Renderer, ReportFormat, TickLimit,
    WallClock,
};
use tracing::info;

pub struct RunArgs {
    pub config: Option<String>,
    pub seed: Option<u32>,
    pub window: Option<f64>,
    pub warmup: Option<f64>,
    pub print_frames: bool,
    pub format: ReportFormat,
    pub no_render: bool,
    pub max_ticks: Option<u64>,
}

impl RunArgs {
    /// Command-line flags take precedence over the file
    fn apply(&self, config: &mut BenchConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(window) = self.window {
            config.observation_window = window;
        }
        if let Some(warmup) = self.warmup {
            config.warmup = warmup;
        }
        if self.print_frames {
            config.print_frames = true;
        }
    }
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let mut sim = Simulation::new(&config)?;
    let mut harness = BenchHarness::new(HarnessConfig::from(&config));
    let mut clock = WallClock::new();

    let mut close: Box<dyn CloseSignal> = match args.max_ticks {
        Some(n) => Box::new(TickLimit::new(n)),
        None => Box::new(NeverClose),
    };

    let mut headless = HeadlessRenderer::new();
    let renderer: Option<&mut dyn Renderer> = if args.no_render {
        None
    } else {
        Some(&mut headless)
    };

    info!(
        seed = config.seed,
        window = config.observation_window,
        capacity = sim.pool().capacity(),
        "starting run"
    );
    let report = harness.run(&mut sim, &mut clock, renderer, close.as_mut());
    if !args.no_render {
        info!(
            frames = headless.frames(),
            bytes = headless.uploaded_bytes(),
            "headless renderer totals"
        );
    }

    print!("{}", report.render(args.format)?);

    if let drift_runtime::Termination::Failed { message } = &report.termination {
        bail!("benchmark failed: {}", message);
    }
    Ok(())
}
