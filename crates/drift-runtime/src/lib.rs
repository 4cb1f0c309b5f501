//! Drift Runtime - Benchmark loop infrastructure
//!
//! Provides the building blocks of a measured run:
//! - `RuntimeSystem`: the simulation ticked by the loop
//! - `TickClock`: wall-clock or scripted tick timing
//! - `BenchHarness`: warm-up / recording / finished loop with timers
//! - `FrameRecord` / `FrameStats`: recorded ticks and their statistics
//! - `BenchReport`: text, JSON and TOML output, frame-dump parsing

mod clock;
mod harness;
mod report;
mod state;
mod stats;
mod system;

pub use clock::{ScriptedClock, TickClock, TickTiming, WallClock};
pub use harness::{BenchHarness, CloseSignal, HarnessConfig, NeverClose, Renderer, TickLimit};
pub use report::{format_frame_dump, parse_frame_dump, BenchReport, ReportFormat, Termination};
pub use state::{BenchPhase, TickTimers};
pub use stats::{FrameRecord, FrameSample, FrameStats};
pub use system::{RuntimeSystem, TickPlan};
