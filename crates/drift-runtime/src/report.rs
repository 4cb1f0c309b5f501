//! End-of-run report and its text/JSON/TOML renderings

use crate::stats::FrameStats;
use drift_core::{DriftError, Result};
use serde::Serialize;
use std::fmt::Write as _;

const DUMP_START: &str = "--:";
const DUMP_END: &str = ".--";

/// Why the benchmark loop stopped
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// The observation window elapsed
    Completed,
    /// The window collaborator asked to close
    CloseRequested,
    /// A system or renderer failed; statistics cover the ticks before it
    Failed { message: String },
}

impl Termination {
    pub fn is_completed(&self) -> bool {
        matches!(self, Termination::Completed)
    }
}

/// Everything a finished run reports
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub system: String,
    pub ticks: u64,
    pub run_time_secs: f64,
    pub discarded_samples: usize,
    pub termination: Termination,
    pub stats: FrameStats,
    /// Raw per-tick frame rates, present when the dump toggle is on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rates: Option<Vec<f64>>,
}

/// Output format for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Toml,
}

impl std::str::FromStr for ReportFormat {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "toml" => Ok(ReportFormat::Toml),
            other => Err(DriftError::InvalidConfig {
                field: "format".to_string(),
                reason: format!("unknown report format '{other}'; valid values: text, json, toml"),
            }),
        }
    }
}

impl BenchReport {
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.format_text()),
            ReportFormat::Json => self.format_json(),
            ReportFormat::Toml => self.format_toml(),
        }
    }

    /// Human-readable report in the classic benchmark wording
    pub fn format_text(&self) -> String {
        let mut out = String::new();
        let stats = &self.stats;

        match (stats.mean_fps, stats.fps_std_dev) {
            (Some(fps), Some(sd)) => {
                let _ = writeln!(out, "Average framerate was: {fps:.6} frames per second.");
                if let Some(logic) = stats.mean_logic_secs {
                    let _ = writeln!(out, "Average logic time was: {logic:.6} seconds per frame.");
                }
                let _ = writeln!(out, "The standard deviation was: {sd:.6} frames per second.");
            }
            _ => {
                let _ = writeln!(out, "No frames were recorded during the observation window.");
            }
        }

        if let Some(rates) = &self.frame_rates {
            out.push_str(&format_frame_dump(rates));
            out.push('\n');
        }

        match &self.termination {
            Termination::Completed => {}
            Termination::CloseRequested => {
                let _ = writeln!(out, "Run stopped early: close requested after {} tick(s).", self.ticks);
            }
            Termination::Failed { message } => {
                let _ = writeln!(out, "Run failed after {} tick(s): {message}", self.ticks);
            }
        }
        out
    }

    pub fn format_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn format_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Frame rates as `--:r1,r2,...,.--`
pub fn format_frame_dump(rates: &[f64]) -> String {
    let mut out = String::with_capacity(rates.len() * 12 + 6);
    out.push_str(DUMP_START);
    for rate in rates {
        let _ = write!(out, "{rate:.6},");
    }
    out.push_str(DUMP_END);
    out
}

/// Extract the frame rates from text containing a `--:...,.--` dump
pub fn parse_frame_dump(text: &str) -> Result<Vec<f64>> {
    let start = text
        .find(DUMP_START)
        .ok_or_else(|| DriftError::FrameDumpError(format!("missing '{DUMP_START}' marker")))?
        + DUMP_START.len();
    let len = text[start..]
        .find(DUMP_END)
        .ok_or_else(|| DriftError::FrameDumpError(format!("missing '{DUMP_END}' marker")))?;

    text[start..start + len]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|e| DriftError::FrameDumpError(format!("invalid frame rate '{s}': {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{FrameSample, FrameStats};

    fn report(samples: &[FrameSample], frame_rates: Option<Vec<f64>>) -> BenchReport {
        BenchReport {
            system: "test".to_string(),
            ticks: samples.len() as u64,
            run_time_secs: samples.iter().map(|s| s.duration).sum(),
            discarded_samples: 0,
            termination: Termination::Completed,
            stats: FrameStats::from_samples(samples),
            frame_rates,
        }
    }

    #[test]
    fn text_report_lines() {
        let samples = [FrameSample {
            duration: 0.25,
            render: None,
        }; 2];
        let text = report(&samples, None).format_text();
        assert_eq!(
            text,
            "Average framerate was: 4.000000 frames per second.\n\
             The standard deviation was: 0.000000 frames per second.\n"
        );
    }

    #[test]
    fn text_report_with_logic_time_and_dump() {
        let samples = [FrameSample {
            duration: 0.5,
            render: Some(0.125),
        }];
        let text = report(&samples, Some(vec![2.0])).format_text();
        assert!(text.contains("Average logic time was: 0.375000 seconds per frame."));
        assert!(text.contains("--:2.000000,.--"));
    }

    #[test]
    fn empty_report_says_no_data() {
        let r = report(&[], None);
        let text = r.format_text();
        assert_eq!(text, "No frames were recorded during the observation window.\n");
        assert!(!text.contains("NaN"));

        let json = r.format_json().unwrap();
        assert!(!json.contains("mean_fps"));
        assert!(json.contains("\"samples\": 0"));
    }

    #[test]
    fn failed_run_is_reported() {
        let mut r = report(&[], None);
        r.termination = Termination::Failed {
            message: "boom".to_string(),
        };
        assert!(r.format_text().contains("Run failed after 0 tick(s): boom"));
        assert!(r.format_json().unwrap().contains("\"kind\": \"failed\""));
    }

    #[test]
    fn toml_report_contains_stats() {
        let samples = [FrameSample {
            duration: 0.25,
            render: None,
        }];
        let toml_text = report(&samples, Some(vec![4.0])).format_toml().unwrap();
        assert!(toml_text.contains("mean_fps = 4.0"));
        assert!(toml_text.contains("kind = \"completed\""));
    }

    #[test]
    fn frame_dump_parses_back() {
        let dump = format_frame_dump(&[50.0, 62.5, 48.25]);
        let text = format!("Average framerate was: 53 frames per second.\n{dump}\n");
        assert_eq!(parse_frame_dump(&text).unwrap(), vec![50.0, 62.5, 48.25]);
    }

    #[test]
    fn frame_dump_errors() {
        assert!(parse_frame_dump("no markers here").is_err());
        assert!(parse_frame_dump("--:1.0,2.0,").is_err());
        assert!(parse_frame_dump("--:1.0,abc,.--").is_err());
        assert_eq!(parse_frame_dump("--:.--").unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("yaml".parse::<ReportFormat>().is_err());
    }
}
