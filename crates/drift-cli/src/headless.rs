//! Headless renderer: stages each snapshot into an upload buffer

use drift_core::{RenderInstance, Result};
use drift_runtime::Renderer;

/// Copies the per-tick snapshot into a byte buffer the way a GPU renderer
/// fills its instance buffer, without a device behind it.
#[derive(Default)]
pub struct HeadlessRenderer {
    staging: Vec<u8>,
    frames: u64,
    uploaded_bytes: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn uploaded_bytes(&self) -> u64 {
        self.uploaded_bytes
    }

    /// Bytes staged by the most recent frame
    pub fn staged(&self) -> &[u8] {
        &self.staging
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, instances: &[RenderInstance]) -> Result<()> {
        let bytes: &[u8] = bytemuck::cast_slice(instances);
        self.staging.clear();
        self.staging.extend_from_slice(bytes);
        self.frames += 1;
        self.uploaded_bytes += bytes.len() as u64;
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::Vec3;

    #[test]
    fn stages_packed_instances() {
        let mut r = HeadlessRenderer::new();
        let instances = [
            RenderInstance::new(Vec3::new(1.0, 2.0, 3.0), 0.5),
            RenderInstance::new(Vec3::new(-1.0, 0.0, 9.0), 2.0),
        ];
        r.render(&instances).unwrap();
        assert_eq!(r.staged().len(), 32);
        assert_eq!(&r.staged()[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&r.staged()[12..16], &0.5f32.to_ne_bytes());

        r.render(&instances[..1]).unwrap();
        assert_eq!(r.staged().len(), 16);
        assert_eq!(r.frames(), 2);
        assert_eq!(r.uploaded_bytes(), 48);
    }
}
