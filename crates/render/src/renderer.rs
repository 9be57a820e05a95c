use crate::camera::PerspectiveCamera;
use crate::scene::{NodeKind, Scene};
use viewstage_common::Color;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// Output-buffer configuration is pushed in by the owner whenever the
/// viewport changes. `render` issues the draw and returns without waiting
/// for the device to finish it.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Resize the output buffer (physical pixels).
    fn set_size(&mut self, width: u32, height: u32);

    fn set_pixel_ratio(&mut self, ratio: f64);

    fn set_clear_color(&mut self, color: Color);

    /// Draw one frame of `scene` as seen from `camera`.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output;
}

/// Debug text renderer for headless runs.
///
/// Produces a human-readable string describing the frame. Useful for CLI
/// output, logging, and testing the render interface.
#[derive(Debug)]
pub struct DebugTextRenderer {
    width: u32,
    height: u32,
    pixel_ratio: f64,
    clear_color: Color,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self {
            width: 1,
            height: 1,
            pixel_ratio: 1.0,
            clear_color: Color::BLACK,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {}x{} @{:.2} clear=#{:06X} ===\n",
            self.width,
            self.height,
            self.pixel_ratio,
            self.clear_color.to_hex()
        ));
        let eye = camera.position;
        let target = camera.target();
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.4}\n",
            eye.x,
            eye.y,
            eye.z,
            target.x,
            target.y,
            target.z,
            camera.fov_degrees,
            camera.aspect()
        ));
        out.push_str(&format!("Nodes: {}\n", scene.len()));

        for node in scene.nodes() {
            let p = node.transform.position;
            let detail = match &node.kind {
                NodeKind::Mesh(mesh) => {
                    format!("mesh color=#{:06X}", mesh.material.color.to_hex())
                }
                NodeKind::DirectionalLight(light) => format!(
                    "light color=#{:06X} intensity={:.2}",
                    light.color.to_hex(),
                    light.intensity
                ),
            };
            out.push_str(&format!(
                "  [{}] {} pos=({:.2}, {:.2}, {:.2}) {}\n",
                node.id.short(),
                node.name,
                p.x,
                p.y,
                p.z,
                detail
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{default_camera, default_scene};

    #[test]
    fn debug_renderer_empty_scene() {
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&Scene::new(), &PerspectiveCamera::default());

        assert!(output.contains("Nodes: 0"));
        assert!(output.contains("fov=50"));
    }

    #[test]
    fn debug_renderer_reflects_configuration() {
        let mut renderer = DebugTextRenderer::new();
        renderer.set_size(800, 600);
        renderer.set_pixel_ratio(2.0);
        renderer.set_clear_color(Color::from_hex(0x1A1A1C));
        assert_eq!(renderer.size(), (800, 600));
        assert_eq!(renderer.pixel_ratio(), 2.0);

        let output = renderer.render(&default_scene(), &default_camera(800.0 / 600.0));
        assert!(output.contains("800x600 @2.00"));
        assert!(output.contains("clear=#1A1A1C"));
        assert!(output.contains("Nodes: 2"));
        assert!(output.contains("mesh color=#44BBEE"));
        assert!(output.contains("light color=#FFFFFF intensity=0.50"));
        assert!(output.contains("aspect=1.3333"));
    }
}
