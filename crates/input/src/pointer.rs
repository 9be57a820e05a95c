use crate::viewport::ViewportState;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pointer position in normalized device coordinates.
///
/// `(-1, -1)` is the bottom-left corner of the viewport, `(1, 1)` the top-right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub ndc_x: f32,
    pub ndc_y: f32,
}

impl PointerState {
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.ndc_x, self.ndc_y)
    }
}

/// Map a raw pointer position (pixels, origin top-left) into NDC.
///
/// Positions on or beyond the viewport edge are dropped: `previous` is
/// returned unchanged.
pub fn on_pointer_move(
    previous: PointerState,
    raw_x: f64,
    raw_y: f64,
    viewport: &ViewportState,
) -> PointerState {
    let w = viewport.width() as f64;
    let h = viewport.height() as f64;

    if !(raw_x > 0.0 && raw_x < w && raw_y > 0.0 && raw_y < h) {
        return previous;
    }

    PointerState {
        ndc_x: ((raw_x / w) * 2.0 - 1.0) as f32,
        ndc_y: (-(raw_y / h) * 2.0 + 1.0) as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::on_resize;

    fn viewport() -> ViewportState {
        on_resize(800, 600, 1.0)
    }

    #[test]
    fn center_maps_to_origin() {
        let p = on_pointer_move(PointerState::default(), 400.0, 300.0, &viewport());
        assert_eq!(p, PointerState { ndc_x: 0.0, ndc_y: 0.0 });
    }

    #[test]
    fn near_top_right_corner() {
        let p = on_pointer_move(PointerState::default(), 799.0, 1.0, &viewport());
        assert!((p.ndc_x - 0.9975).abs() < 1e-4);
        assert!((p.ndc_y - 0.99667).abs() < 1e-4);
    }

    #[test]
    fn boundary_is_outside() {
        let prev = PointerState { ndc_x: 0.25, ndc_y: -0.5 };
        let v = viewport();
        for (x, y) in [
            (0.0, 0.0),
            (0.0, 300.0),
            (800.0, 300.0),
            (400.0, 0.0),
            (400.0, 600.0),
            (-5.0, 300.0),
            (400.0, 900.0),
        ] {
            assert_eq!(on_pointer_move(prev, x, y, &v), prev, "({x}, {y})");
        }
    }

    #[test]
    fn nan_position_is_dropped() {
        let prev = PointerState { ndc_x: 0.1, ndc_y: 0.2 };
        assert_eq!(on_pointer_move(prev, f64::NAN, 10.0, &viewport()), prev);
    }

    #[test]
    fn inside_stays_in_range_and_monotonic() {
        let v = viewport();
        let mut last_x = f32::NEG_INFINITY;
        for x in (1..800).step_by(7) {
            let p = on_pointer_move(PointerState::default(), x as f64, 300.0, &v);
            assert!((-1.0..=1.0).contains(&p.ndc_x));
            assert!(p.ndc_x > last_x);
            last_x = p.ndc_x;
        }

        let mut last_y = f32::INFINITY;
        for y in (1..600).step_by(7) {
            let p = on_pointer_move(PointerState::default(), 400.0, y as f64, &v);
            assert!((-1.0..=1.0).contains(&p.ndc_y));
            assert!(p.ndc_y < last_y);
            last_y = p.ndc_y;
        }
    }

    #[test]
    fn uses_viewport_at_call_time() {
        let small = on_resize(100, 100, 1.0);
        let prev = PointerState::default();
        assert_eq!(on_pointer_move(prev, 400.0, 300.0, &small), prev);
        let p = on_pointer_move(prev, 50.0, 50.0, &small);
        assert_eq!(p.as_vec2(), Vec2::ZERO);
    }
}
