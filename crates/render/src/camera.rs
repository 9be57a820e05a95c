use glam::{Mat4, Vec3};

/// Perspective camera looking from `position` at `target`.
///
/// The projection is rebuilt from `fov_degrees`, `aspect`, `near` and `far`
/// each time it is requested, so a new aspect ratio takes effect on the next
/// frame without an explicit update step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub up: Vec3,
    target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            up: Vec3::Y,
            target: Vec3::NEG_Z,
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Point the camera at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        } else {
            tracing::warn!("ignoring invalid camera aspect {aspect}");
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(50.0, 1.0, 0.1, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_is_valid() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 1.5, 3.5);
        cam.look_at(Vec3::ZERO);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn target_projects_to_center() {
        let mut cam = PerspectiveCamera::new(50.0, 16.0 / 9.0, 0.1, 100.0);
        cam.position = Vec3::new(0.0, 1.5, 3.5);
        cam.look_at(Vec3::ZERO);
        let clip = cam.view_projection().project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&clip.z));
    }

    #[test]
    fn aspect_changes_projection() {
        let mut cam = PerspectiveCamera::default();
        let before = cam.projection_matrix();
        cam.set_aspect(1920.0 / 1080.0);
        assert_ne!(before, cam.projection_matrix());
        assert!((cam.aspect() - 1.7778).abs() < 1e-4);
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut cam = PerspectiveCamera::default();
        cam.set_aspect(0.0);
        cam.set_aspect(f32::INFINITY);
        assert_eq!(cam.aspect(), 1.0);
    }
}
