//! Drift CLI - run, trace and graph the particle benchmark

mod commands;
mod graph;
mod headless;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, graph as graph_cmd, run, trace};

#[derive(Parser)]
#[command(name = "drift")]
#[command(about = "Particle-system throughput benchmark", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark against the wall clock and print a report
    Run {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<String>,

        /// Generator seed
        #[arg(long)]
        seed: Option<u32>,

        /// Observation window in seconds
        #[arg(long)]
        window: Option<f64>,

        /// Warm-up in seconds
        #[arg(long)]
        warmup: Option<f64>,

        /// Append the raw per-tick frame rates to the report
        #[arg(long)]
        print_frames: bool,

        /// Output format (text, json or toml)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: drift_runtime::ReportFormat,

        /// Skip the render channel
        #[arg(long)]
        no_render: bool,

        /// Request close after this many ticks
        #[arg(long)]
        max_ticks: Option<u64>,
    },

    /// Step the simulation with a fixed tick duration and print its state hash
    Trace {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<String>,

        /// Generator seed
        #[arg(long)]
        seed: Option<u32>,

        /// Number of ticks to run
        #[arg(long, default_value = "1000")]
        ticks: u64,

        /// Tick duration in seconds
        #[arg(long, default_value = "0.02")]
        dt: f64,

        /// Print a state line every N ticks (0 disables)
        #[arg(long, default_value = "100")]
        every: u64,

        /// Fail unless the final state hash equals this one
        #[arg(long)]
        expect: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<String>,
    },

    /// Draw a frame-rate dump as a bar graph image (PNG or PPM)
    Graph {
        /// Report file containing a `--:...,.--` frame dump
        #[arg(short, long)]
        input: String,

        /// Output image path
        #[arg(short, long, default_value = "frames.png")]
        output: String,

        /// Scale bars to the largest sample instead of --max-fps
        #[arg(long)]
        relative: bool,

        /// Frame rate drawn as a full-width bar
        #[arg(long, default_value = "100")]
        max_fps: f64,
    },
}

fn parse_format(s: &str) -> Result<drift_runtime::ReportFormat, String> {
    s.parse().map_err(|e: drift_core::DriftError| e.to_string())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            seed,
            window,
            warmup,
            print_frames,
            format,
            no_render,
            max_ticks,
        } => run::run(run::RunArgs {
            config,
            seed,
            window,
            warmup,
            print_frames,
            format,
            no_render,
            max_ticks,
        }),
        Commands::Trace {
            config,
            seed,
            ticks,
            dt,
            every,
            expect,
        } => trace::run(trace::TraceArgs {
            config,
            seed,
            ticks,
            dt,
            every,
            expect,
        }),
        Commands::Config { config } => config::run(config.as_deref()),
        Commands::Graph {
            input,
            output,
            relative,
            max_fps,
        } => graph_cmd::run(graph_cmd::GraphArgs {
            input,
            output,
            relative,
            max_fps,
        }),
    }
}
