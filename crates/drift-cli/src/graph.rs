//! Frame-rate bar graph

use image::{Rgb, RgbImage};

pub const GRAPH_WIDTH: u32 = 400;
pub const GRAPH_HEIGHT: u32 = 600;

/// How bar lengths are scaled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphScale {
    /// `max_fps` fills the full width
    Absolute { max_fps: f64 },
    /// The largest sample fills the full width
    Relative,
}

/// One horizontal bar per sample, top to bottom, white on black.
pub struct FrameGraph {
    rates: Vec<f64>,
    scale: GraphScale,
}

impl FrameGraph {
    pub fn new(rates: &[f64], scale: GraphScale) -> Self {
        Self {
            rates: decimate(rates, GRAPH_HEIGHT as usize),
            scale,
        }
    }

    /// Samples that will be drawn, after decimation
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    fn full_scale(&self) -> f64 {
        match self.scale {
            GraphScale::Absolute { max_fps } => max_fps,
            GraphScale::Relative => self.rates.iter().copied().fold(0.0, f64::max),
        }
    }

    /// Bar length in pixels for one sample
    pub fn bar_len(&self, rate: f64) -> u32 {
        let full = self.full_scale();
        if full.is_nan() || full <= 0.0 || !rate.is_finite() || rate <= 0.0 {
            return 0;
        }
        let len = (rate / full * GRAPH_WIDTH as f64).round();
        len.min(GRAPH_WIDTH as f64) as u32
    }

    pub fn render(&self) -> RgbImage {
        let mut img = RgbImage::new(GRAPH_WIDTH, GRAPH_HEIGHT);
        for (row, &rate) in self.rates.iter().enumerate() {
            for x in 0..self.bar_len(rate) {
                img.put_pixel(x, row as u32, Rgb([255, 255, 255]));
            }
        }
        img
    }
}

/// Drop every 4th sample until at most `rows` remain
fn decimate(rates: &[f64], rows: usize) -> Vec<f64> {
    let mut kept = rates.to_vec();
    while kept.len() > rows && kept.len() > 3 {
        kept = kept
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 4 != 3)
            .map(|(_, r)| *r)
            .collect();
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_runs_are_not_decimated() {
        let rates: Vec<f64> = (0..600).map(|i| i as f64).collect();
        assert_eq!(decimate(&rates, 600).len(), 600);
    }

    #[test]
    fn long_runs_lose_every_fourth_sample() {
        let rates: Vec<f64> = (0..800).map(|i| i as f64).collect();
        let kept = decimate(&rates, 600);
        assert_eq!(kept.len(), 600);
        assert_eq!(&kept[..4], &[0.0, 1.0, 2.0, 4.0]);

        let many: Vec<f64> = vec![1.0; 5000];
        assert!(decimate(&many, 600).len() <= 600);
    }

    #[test]
    fn absolute_scale_clamps() {
        let g = FrameGraph::new(&[50.0, 200.0, 0.0], GraphScale::Absolute { max_fps: 100.0 });
        assert_eq!(g.bar_len(50.0), 200);
        assert_eq!(g.bar_len(200.0), GRAPH_WIDTH);
        assert_eq!(g.bar_len(0.0), 0);
    }

    #[test]
    fn relative_scale_uses_max_sample() {
        let g = FrameGraph::new(&[30.0, 60.0], GraphScale::Relative);
        assert_eq!(g.bar_len(60.0), GRAPH_WIDTH);
        assert_eq!(g.bar_len(30.0), 200);

        let empty = FrameGraph::new(&[], GraphScale::Relative);
        assert_eq!(empty.bar_len(10.0), 0);
    }

    #[test]
    fn image_has_white_bars_on_black() {
        let img = FrameGraph::new(&[50.0], GraphScale::Absolute { max_fps: 100.0 }).render();
        assert_eq!(img.dimensions(), (GRAPH_WIDTH, GRAPH_HEIGHT));
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(199, 0), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(200, 0), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(0, 1), &Rgb([0, 0, 0]));
    }
}
