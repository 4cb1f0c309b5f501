//! Frame record and the statistics computed from it

use serde::Serialize;

/// One recorded tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSample {
    /// Whole tick duration in seconds
    pub duration: f64,
    /// Renderer share of `duration`, when a renderer is attached
    pub render: Option<f64>,
}

/// Append-only record of ticks taken during the recording phase.
///
/// Once closed it rejects further samples. Samples with a non-positive or
/// non-finite duration have no frame rate and are counted as discarded
/// instead of stored.
#[derive(Debug, Default)]
pub struct FrameRecord {
    samples: Vec<FrameSample>,
    discarded: usize,
    closed: bool,
}

impl FrameRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample. Returns false if it was not stored.
    pub fn push(&mut self, sample: FrameSample) -> bool {
        if self.closed {
            return false;
        }
        if !sample.duration.is_finite() || sample.duration <= 0.0 {
            self.discarded += 1;
            return false;
        }
        self.samples.push(sample);
        true
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn samples(&self) -> &[FrameSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Per-tick frame rates (`1 / duration`), in recording order
    pub fn frame_rates(&self) -> Vec<f64> {
        self.samples.iter().map(|s| 1.0 / s.duration).collect()
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats::from_samples(&self.samples)
    }
}

/// Population statistics over a frame record.
///
/// Every field is `None` when there are no samples, so an empty run reports
/// "no data" rather than NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameStats {
    pub samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_frame_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_fps: Option<f64>,
    /// Standard deviation of `1 / duration` around `mean_fps`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps_std_dev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_render_secs: Option<f64>,
    /// Mean tick time spent outside the renderer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_logic_secs: Option<f64>,
}

impl FrameStats {
    pub fn from_samples(samples: &[FrameSample]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self::default();
        }
        let count = n as f64;

        let mean_frame = samples.iter().map(|s| s.duration).sum::<f64>() / count;
        let mean_fps = 1.0 / mean_frame;
        let variance = samples
            .iter()
            .map(|s| (1.0 / s.duration - mean_fps).powi(2))
            .sum::<f64>()
            / count;

        // The render channel exists only if every sample carries it
        let render_total: Option<f64> = samples.iter().map(|s| s.render).sum();
        let mean_render = render_total.map(|total| total / count);

        Self {
            samples: n,
            mean_frame_secs: Some(mean_frame),
            mean_fps: Some(mean_fps),
            fps_std_dev: Some(variance.sqrt()),
            mean_render_secs: mean_render,
            mean_logic_secs: mean_render.map(|render| mean_frame - render),
        }
    }

    pub fn has_data(&self) -> bool {
        self.samples > 0
    }
}
