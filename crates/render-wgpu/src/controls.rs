use glam::Vec3;
use std::f32::consts::{PI, TAU};
use viewstage_render::PerspectiveCamera;

const POLE_EPSILON: f32 = 1e-3;

/// Orbit controls: drag to rotate the camera around a target, scroll to dolly.
///
/// State is kept in spherical coordinates around `target` (y-up, azimuth
/// measured from +Z). Camera motion lives outside the stage's tracked
/// state; the controls write straight into the camera.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    radius: f32,
    /// Azimuth around +Y, radians.
    theta: f32,
    /// Polar angle from +Y, radians.
    phi: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitControls {
    /// Bind to `camera`, orbiting around its current look-at target.
    pub fn new(camera: &PerspectiveCamera) -> Self {
        let target = camera.target();
        let offset = camera.position - target;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            target,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            min_distance: 0.5,
            max_distance: 50.0,
            dragging: false,
            last_cursor: None,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed a primary button transition. A press starts a drag only when no
    /// overlay captured it; a release always ends the drag.
    pub fn button(&mut self, pressed: bool, captured: bool) {
        if !pressed {
            self.dragging = false;
        } else if !captured {
            self.dragging = true;
        }
    }

    /// Feed a cursor position (physical pixels). Rotates while dragging; a
    /// drag across the full surface height turns the camera once around.
    /// Returns whether the orbit changed.
    pub fn cursor_moved(&mut self, x: f64, y: f64, surface_height: u32) -> bool {
        let last = self.last_cursor.replace((x, y));
        let Some((last_x, last_y)) = last else {
            return false;
        };
        if !self.dragging {
            return false;
        }

        let scale = TAU * self.rotate_speed / surface_height.max(1) as f32;
        self.rotate((x - last_x) as f32 * scale, (y - last_y) as f32 * scale);
        true
    }

    /// Rotate by angle deltas in radians. Positive `d_theta` swings the camera
    /// to the left around the target.
    pub fn rotate(&mut self, d_theta: f32, d_phi: f32) {
        self.theta -= d_theta;
        self.phi = (self.phi - d_phi).clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }

    /// Dolly by scroll lines. Positive lines move toward the target.
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - self.zoom_speed).powf(lines);
        self.radius = (self.radius * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Camera position implied by the current orbit.
    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target + self.radius * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    /// Write the orbit into `camera`.
    pub fn apply(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.eye();
        camera.look_at(self.target);
    }
}
