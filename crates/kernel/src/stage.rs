use crate::clock::{FrameClock, FrameTime};
use crate::render_loop::{FrameScheduler, LoopError, LoopState, RenderLoop};
use viewstage_input::{HostEvent, PointerState, ViewportState, on_pointer_move, on_resize};
use viewstage_render::bootstrap::{default_camera, default_scene};
use viewstage_render::{Intersection, PerspectiveCamera, Raycaster, Renderer, RendererConfig, Scene};

/// Callback receiving the nearest pointer hit of a frame.
pub type PickHandler = Box<dyn FnMut(&Intersection)>;

/// The controller owning everything the render loop reads.
///
/// Viewport, pointer and clock are only written here, through the pure
/// update functions of `viewstage-input` and the clock. Derived values are
/// pushed into the camera and renderer as soon as they change.
pub struct Stage<R: Renderer> {
    renderer: R,
    scene: Scene,
    camera: PerspectiveCamera,
    viewport: ViewportState,
    pointer: PointerState,
    clock: FrameClock,
    render_loop: RenderLoop,
    pick_handler: Option<PickHandler>,
    last_pick: Option<Intersection>,
}

impl<R: Renderer> Stage<R> {
    /// Build the startup scene and apply `viewport` eagerly.
    pub fn new(
        renderer: R,
        config: &RendererConfig,
        viewport: ViewportState,
        clock: FrameClock,
    ) -> Self {
        let mut stage = Self {
            renderer,
            scene: default_scene(),
            camera: default_camera(viewport.aspect_ratio()),
            viewport,
            pointer: PointerState::default(),
            clock,
            render_loop: RenderLoop::new(),
            pick_handler: None,
            last_pick: None,
        };
        stage.renderer.set_clear_color(config.clear_color);
        stage.apply_viewport(viewport);
        stage
    }

    /// Register the event listeners and enter the running state.
    pub fn start(&mut self) -> Result<(), LoopError> {
        self.render_loop.start()
    }

    /// Deregister the event listeners and halt rescheduling.
    pub fn stop(&mut self) -> bool {
        self.render_loop.stop()
    }

    /// Dispatch a host event to its listener. Returns false when no listener
    /// is registered for it.
    pub fn handle_event(&mut self, event: HostEvent) -> bool {
        if !self.render_loop.listens(&event) {
            return false;
        }
        match event {
            HostEvent::Resized { width, height } => {
                let viewport = on_resize(width, height, self.viewport.device_pixel_ratio());
                self.apply_viewport(viewport);
            }
            HostEvent::ScaleFactorChanged(ratio) => {
                let viewport = on_resize(self.viewport.width(), self.viewport.height(), ratio);
                self.apply_viewport(viewport);
            }
            HostEvent::PointerMoved { x, y } => {
                self.pointer = on_pointer_move(self.pointer, x, y, &self.viewport);
            }
        }
        true
    }

    fn apply_viewport(&mut self, viewport: ViewportState) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect_ratio());
        self.renderer.set_size(viewport.width(), viewport.height());
        self.renderer.set_pixel_ratio(viewport.device_pixel_ratio());
        tracing::debug!(
            width = viewport.width(),
            height = viewport.height(),
            pixel_ratio = viewport.device_pixel_ratio(),
            aspect = viewport.aspect_ratio(),
            "viewport updated"
        );
    }

    /// Run one iteration of the render loop.
    ///
    /// Returns `None` without touching any state when the loop is not running.
    pub fn frame(&mut self, scheduler: &mut impl FrameScheduler) -> Option<R::Output> {
        if !self.render_loop.is_running() {
            return None;
        }

        self.clock.tick();

        if let Some(handler) = self.pick_handler.as_mut() {
            let caster = Raycaster::from_camera(self.pointer.as_vec2(), &self.camera);
            self.last_pick = caster.nearest(&self.scene);
            if let Some(hit) = &self.last_pick {
                handler(hit);
            }
        }

        let output = self.renderer.render(&self.scene, &self.camera);
        self.render_loop.record_frame();

        scheduler.request_frame();
        Some(output)
    }

    /// Turn on pointer picking. `handler` sees only the nearest hit of each
    /// frame, and is not called on frames without a hit. Such frames clear
    /// `last_pick`.
    pub fn enable_picking(&mut self, handler: impl FnMut(&Intersection) + 'static) {
        self.pick_handler = Some(Box::new(handler));
    }

    pub fn disable_picking(&mut self) {
        self.pick_handler = None;
        self.last_pick = None;
    }

    pub fn picking_enabled(&self) -> bool {
        self.pick_handler.is_some()
    }

    pub fn last_pick(&self) -> Option<Intersection> {
        self.last_pick
    }

    pub fn state(&self) -> LoopState {
        self.render_loop.state()
    }

    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn frame_time(&self) -> FrameTime {
        self.clock.current()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedStepTime, TimeSource};
    use crate::render_loop::FrameRequests;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use viewstage_common::Color;
    use viewstage_render::DebugTextRenderer;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Size(u32, u32),
        PixelRatio(f64),
        ClearColor(u32),
        Render { aspect: f32 },
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<Call>,
    }

    impl Renderer for RecordingRenderer {
        type Output = usize;

        fn set_size(&mut self, width: u32, height: u32) {
            self.calls.push(Call::Size(width, height));
        }

        fn set_pixel_ratio(&mut self, ratio: f64) {
            self.calls.push(Call::PixelRatio(ratio));
        }

        fn set_clear_color(&mut self, color: Color) {
            self.calls.push(Call::ClearColor(color.to_hex()));
        }

        fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> usize {
            self.calls.push(Call::Render {
                aspect: camera.aspect(),
            });
            scene.len()
        }
    }

    fn stage(width: u32, height: u32) -> Stage<RecordingRenderer> {
        Stage::new(
            RecordingRenderer::default(),
            &RendererConfig::default(),
            on_resize(width, height, 1.0),
            FrameClock::with_source(FixedStepTime::new(Duration::from_millis(16))),
        )
    }

    fn running(width: u32, height: u32) -> Stage<RecordingRenderer> {
        let mut s = stage(width, height);
        s.start().unwrap();
        s
    }

    #[test]
    fn startup_configures_renderer_eagerly() {
        let s = stage(800, 600);
        assert_eq!(
            s.renderer().calls,
            vec![
                Call::ClearColor(0x1A1A1C),
                Call::Size(800, 600),
                Call::PixelRatio(1.0)
            ]
        );
        assert!((s.camera().aspect() - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(s.state(), LoopState::Idle);
        assert_eq!(s.scene().len(), 2);
    }

    #[test]
    fn resize_notifies_camera_and_renderer() {
        let mut s = running(800, 600);
        assert!((s.viewport().aspect_ratio() - 1.3333).abs() < 1e-4);

        assert!(s.handle_event(HostEvent::Resized {
            width: 1920,
            height: 1080
        }));
        assert!((s.viewport().aspect_ratio() - 1.7778).abs() < 1e-4);
        assert_eq!(s.camera().aspect(), s.viewport().aspect_ratio());
        let tail = &s.renderer().calls[s.renderer().calls.len() - 2..];
        assert_eq!(tail, &[Call::Size(1920, 1080), Call::PixelRatio(1.0)]);
    }

    #[test]
    fn scale_factor_keeps_size() {
        let mut s = running(800, 600);
        s.handle_event(HostEvent::ScaleFactorChanged(2.0));
        assert_eq!(s.viewport().width(), 800);
        assert_eq!(s.viewport().device_pixel_ratio(), 2.0);
        assert_eq!(s.renderer().calls.last(), Some(&Call::PixelRatio(2.0)));
    }

    #[test]
    fn pointer_moves_use_current_viewport() {
        let mut s = running(800, 600);
        s.handle_event(HostEvent::PointerMoved { x: 400.0, y: 300.0 });
        assert_eq!(s.pointer(), PointerState::default());

        s.handle_event(HostEvent::PointerMoved { x: 799.0, y: 1.0 });
        let p = s.pointer();
        assert!((p.ndc_x - 0.9975).abs() < 1e-4);
        assert!((p.ndc_y - 0.99667).abs() < 1e-4);

        s.handle_event(HostEvent::PointerMoved { x: 0.0, y: 0.0 });
        assert_eq!(s.pointer(), p);
    }

    #[test]
    fn events_ignored_before_start() {
        let mut s = stage(800, 600);
        assert!(!s.handle_event(HostEvent::PointerMoved { x: 799.0, y: 1.0 }));
        assert!(!s.handle_event(HostEvent::Resized {
            width: 10,
            height: 10
        }));
        assert_eq!(s.pointer(), PointerState::default());
        assert_eq!(s.viewport().width(), 800);
    }

    #[test]
    fn frame_ticks_renders_and_reschedules() {
        let mut s = running(800, 600);
        let mut requests = FrameRequests::default();

        assert_eq!(s.frame(&mut requests), Some(2));
        assert_eq!(s.frame(&mut requests), Some(2));

        assert_eq!(requests, FrameRequests(2));
        assert_eq!(s.frames(), 2);
        let t = s.frame_time();
        assert_eq!(t.frame_index, 1);
        assert!((t.elapsed - 0.032).abs() < 1e-9);
        assert_eq!(s.renderer().calls.last(), Some(&Call::Render { aspect: 800.0 / 600.0 }));
    }

    #[test]
    fn idle_frame_is_inert() {
        let mut s = stage(800, 600);
        let mut requests = FrameRequests::default();
        assert_eq!(s.frame(&mut requests), None);
        assert_eq!(requests, FrameRequests(0));
        assert_eq!(s.frame_time(), FrameTime::default());
    }

    #[test]
    fn stop_halts_loop_and_listeners() {
        let mut s = running(800, 600);
        let mut requests = FrameRequests::default();
        s.frame(&mut requests);

        assert!(s.stop());
        assert_eq!(s.state(), LoopState::Stopped);
        assert_eq!(s.frame(&mut requests), None);
        assert_eq!(requests, FrameRequests(1));
        assert!(!s.handle_event(HostEvent::Resized {
            width: 1920,
            height: 1080
        }));
        assert_eq!(s.viewport().width(), 800);
        assert_eq!(s.start(), Err(LoopError::Stopped));
    }

    #[test]
    fn picking_reports_nearest_hit() {
        let mut s = running(800, 600);
        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = hits.clone();
        s.enable_picking(move |hit| sink.borrow_mut().push(*hit));

        s.handle_event(HostEvent::PointerMoved { x: 400.0, y: 300.0 });
        s.frame(&mut FrameRequests::default());

        let cube = s.scene().meshes().next().map(|(n, _)| n.id).unwrap();
        let recorded = hits.borrow();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].node, cube);
        assert_eq!(s.last_pick().map(|h| h.node), Some(cube));
    }

    #[test]
    fn picking_without_hit_is_noop() {
        let mut s = running(800, 600);
        let calls = Rc::new(RefCell::new(0));
        let sink = calls.clone();
        s.enable_picking(move |_| *sink.borrow_mut() += 1);

        s.handle_event(HostEvent::PointerMoved { x: 5.0, y: 5.0 });
        assert_eq!(s.frame(&mut FrameRequests::default()), Some(2));
        assert_eq!(*calls.borrow(), 0);
        assert!(s.last_pick().is_none());
    }

    #[test]
    fn miss_frame_clears_last_pick() {
        let mut s = running(800, 600);
        let calls = Rc::new(RefCell::new(0));
        let sink = calls.clone();
        s.enable_picking(move |_| *sink.borrow_mut() += 1);

        s.handle_event(HostEvent::PointerMoved { x: 400.0, y: 300.0 });
        s.frame(&mut FrameRequests::default());
        assert!(s.last_pick().is_some());

        s.handle_event(HostEvent::PointerMoved { x: 5.0, y: 5.0 });
        s.frame(&mut FrameRequests::default());
        assert!(s.last_pick().is_none());
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn frame_steps_run_in_fixed_order() {
        type Log = Rc<RefCell<Vec<&'static str>>>;

        struct LoggingTime(Log);
        impl TimeSource for LoggingTime {
            fn now(&mut self) -> Duration {
                self.0.borrow_mut().push("tick");
                Duration::ZERO
            }
        }

        struct LoggingRenderer(Log);
        impl Renderer for LoggingRenderer {
            type Output = ();
            fn set_size(&mut self, _: u32, _: u32) {}
            fn set_pixel_ratio(&mut self, _: f64) {}
            fn set_clear_color(&mut self, _: Color) {}
            fn render(&mut self, _: &Scene, _: &PerspectiveCamera) {
                self.0.borrow_mut().push("render");
            }
        }

        struct LoggingScheduler(Log);
        impl FrameScheduler for LoggingScheduler {
            fn request_frame(&mut self) {
                self.0.borrow_mut().push("reschedule");
            }
        }

        let log: Log = Rc::default();
        let mut s = Stage::new(
            LoggingRenderer(log.clone()),
            &RendererConfig::default(),
            on_resize(800, 600, 1.0),
            FrameClock::with_source(LoggingTime(log.clone())),
        );
        let sink = log.clone();
        s.enable_picking(move |_| sink.borrow_mut().push("pick"));
        s.start().unwrap();
        s.handle_event(HostEvent::PointerMoved { x: 400.0, y: 300.0 });

        log.borrow_mut().clear();
        s.frame(&mut LoggingScheduler(log.clone()));
        assert_eq!(*log.borrow(), vec!["tick", "pick", "render", "reschedule"]);
    }

    #[test]
    fn picking_disabled_by_default() {
        let mut s = running(800, 600);
        s.frame(&mut FrameRequests::default());
        assert!(!s.picking_enabled());
        assert!(s.last_pick().is_none());
    }

    #[test]
    fn runs_with_debug_text_renderer() {
        let mut s = Stage::new(
            DebugTextRenderer::new(),
            &RendererConfig::default(),
            on_resize(1280, 720, 2.0),
            FrameClock::new(),
        );
        s.start().unwrap();
        let text = s.frame(&mut FrameRequests::default()).unwrap();
        assert!(text.contains("1280x720 @2.00"));
        assert!(text.contains("default_cube"));
    }
}
