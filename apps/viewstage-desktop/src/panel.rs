use egui::Context as EguiContext;
use viewstage_render_wgpu::{SurfaceFrame, WgpuRenderer};
use viewstage_tools::StageSummary;
use winit::event::WindowEvent;
use winit::window::Window;

/// Read-only debug overlay drawn on top of the scene.
pub struct DebugPanel {
    ctx: EguiContext,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugPanel {
    pub fn new(window: &Window, renderer: &WgpuRenderer, visible: bool) -> Self {
        let ctx = EguiContext::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(renderer.device(), renderer.surface_format(), None, 1, false);
        Self {
            ctx,
            state,
            renderer: egui_renderer,
            visible,
        }
    }

    /// Forward a window event. Returns true when the panel consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        if !self.visible {
            return false;
        }
        self.state.on_window_event(window, event).consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Record and submit the panel into an already rendered frame.
    pub fn paint(
        &mut self,
        window: &Window,
        renderer: &WgpuRenderer,
        frame: &SurfaceFrame,
        summary: &StageSummary,
    ) {
        if !self.visible {
            return;
        }

        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| draw(ctx, summary));
        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = renderer.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let device = renderer.device();
        let queue = renderer.queue();
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        self.renderer
            .update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

fn draw(ctx: &EguiContext, summary: &StageSummary) {
    egui::SidePanel::left("debug_panel")
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("viewstage");
            ui.separator();
            ui.label(format!("Loop: {}", summary.state));
            ui.label(format!("Frames: {}", summary.frames));
            ui.label(format!("Elapsed: {:.2} s", summary.time.elapsed));
            ui.label(format!(
                "Delta: {:.2} ms ({:.0} fps)",
                summary.time.delta * 1000.0,
                summary.fps()
            ));
            ui.separator();

            ui.heading("Viewport");
            ui.label(format!(
                "{} x {}  aspect {:.4}",
                summary.viewport.width(),
                summary.viewport.height(),
                summary.viewport.aspect_ratio()
            ));
            ui.label(format!(
                "Pixel ratio: {:.2}",
                summary.viewport.device_pixel_ratio()
            ));
            ui.label(format!(
                "Pointer NDC: ({:.3}, {:.3})",
                summary.pointer.ndc_x, summary.pointer.ndc_y
            ));
            ui.separator();

            ui.heading("Scene");
            ui.label(format!("Nodes: {}", summary.node_count));
            if summary.picking {
                match &summary.last_pick {
                    Some(pick) => ui.label(format!("Pick: {pick}")),
                    None => ui.label("Pick: none"),
                };
            }

            ui.separator();
            ui.small("F1: Toggle Panel | LMB: Orbit | Wheel: Zoom | Esc: Quit");
        });
}
