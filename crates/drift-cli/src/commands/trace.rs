//! Fixed-step trace for comparing trajectories between runs

use super::load_config;
use anyhow::{bail, Context, Result};
use drift_core::StateHash;
use drift_particles::Simulation;
use drift_runtime::{BenchHarness, BenchPhase, HarnessConfig, RuntimeSystem, ScriptedClock};

pub struct TraceArgs {
    pub config: Option<String>,
    pub seed: Option<u32>,
    pub ticks: u64,
    pub dt: f64,
    pub every: u64,
    pub expect: Option<String>,
}

pub fn run(args: TraceArgs) -> Result<()> {
    let expected = match args.expect.as_deref() {
        Some(text) => match StateHash::parse(text) {
            Some(h) => Some(h),
            None => bail!("--expect is not a SHA-256 hash: '{}'", text),
        },
        None => None,
    };

    let hash = trace(&args, &mut std::io::stdout().lock())?;
    println!("state hash: {}", hash.to_prefixed_hex());

    if let Some(expected) = expected {
        if expected != hash {
            bail!(
                "state hash mismatch: expected {}, got {}",
                expected.to_prefixed_hex(),
                hash.to_prefixed_hex()
            );
        }
    }
    Ok(())
}

/// Run `args.ticks` ticks of `args.dt` seconds, writing a state line every
/// `args.every` ticks. Stops early when the observation window closes.
fn trace(args: &TraceArgs, out: &mut impl std::io::Write) -> Result<StateHash> {
    if !args.dt.is_finite() || args.dt <= 0.0 {
        bail!("--dt must be a positive number of seconds, got {}", args.dt);
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut sim = Simulation::new(&config)?;
    let mut harness = BenchHarness::new(HarnessConfig::from(&config));
    let mut clock = ScriptedClock::fixed(args.dt);

    sim.initialize()?;
    for tick in 1..=args.ticks {
        if harness.phase() == BenchPhase::Finished {
            writeln!(out, "window closed after {} tick(s)", harness.ticks())?;
            break;
        }
        harness
            .tick(&mut sim, &mut clock, None)
            .with_context(|| format!("tick {} failed", tick))?;

        if args.every > 0 && tick % args.every == 0 {
            let pool = sim.pool();
            let w = sim.wind().velocity;
            writeln!(
                out,
                "tick {:>6}  live [{}, {})  alive {:>6}  wind ({:.6}, {:.6}, {:.6})",
                tick,
                pool.live_floor(),
                pool.live_ceiling(),
                pool.alive_count(),
                w.x,
                w.y,
                w.z
            )?;
        }
    }
    sim.shutdown()?;
    Ok(sim.state_hash())
}
