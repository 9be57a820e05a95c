//! Startup contents of the stage: camera placement, the key light and the default cube.

use crate::camera::PerspectiveCamera;
use crate::scene::{DirectionalLight, Geometry, Mesh, Node, Scene, StandardMaterial};
use glam::Vec3;
use viewstage_common::{Color, Transform};

pub const CLEAR_COLOR: u32 = 0x1A1A1C;
pub const CUBE_COLOR: u32 = 0x44BBEE;
pub const LIGHT_COLOR: u32 = 0xFFFFFF;
pub const LIGHT_INTENSITY: f32 = 0.5;

pub const CAMERA_FOV_DEGREES: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.5, 3.5);
pub const LIGHT_POSITION: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Camera at its startup pose, looking at the origin.
pub fn default_camera(aspect: f32) -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::new(CAMERA_FOV_DEGREES, aspect, CAMERA_NEAR, CAMERA_FAR);
    camera.position = CAMERA_POSITION;
    camera.look_at(Vec3::ZERO);
    camera
}

/// Scene with one directional light and one unit cube at the origin.
pub fn default_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add(Node::directional_light(
        "key_light",
        LIGHT_POSITION,
        DirectionalLight {
            color: Color::from_hex(LIGHT_COLOR),
            intensity: LIGHT_INTENSITY,
            target: Vec3::ZERO,
        },
    ));
    scene.add(default_cube());
    scene
}

pub fn default_cube() -> Node {
    Node::mesh(
        "default_cube",
        Transform::default(),
        Mesh {
            geometry: Geometry::unit_box(),
            material: StandardMaterial::with_color(CUBE_COLOR),
        },
    )
}
