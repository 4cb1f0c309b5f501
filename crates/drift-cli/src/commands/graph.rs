//! Frame dump to bar graph image

use crate::graph::{FrameGraph, GraphScale};
use anyhow::{bail, Context, Result};
use drift_runtime::parse_frame_dump;

pub struct GraphArgs {
    pub input: String,
    pub output: String,
    pub relative: bool,
    pub max_fps: f64,
}

pub fn run(args: GraphArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read '{}'", args.input))?;
    let rates = parse_frame_dump(&text).context("Failed to parse frame dump")?;

    let scale = if args.relative {
        GraphScale::Relative
    } else {
        if !args.max_fps.is_finite() || args.max_fps <= 0.0 {
            bail!("--max-fps must be positive, got {}", args.max_fps);
        }
        GraphScale::Absolute {
            max_fps: args.max_fps,
        }
    };

    let graph = FrameGraph::new(&rates, scale);
    graph
        .render()
        .save(&args.output)
        .with_context(|| format!("Failed to write '{}'", args.output))?;

    println!(
        "Graphed {} of {} frame(s) to {}",
        graph.rates().len(),
        rates.len(),
        args.output
    );
    Ok(())
}
