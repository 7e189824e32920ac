use egui::{pos2, vec2, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Camera tuning knobs, loadable from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Plane width of the view rectangle at session start.
    pub initial_view_width: f32,
    /// Plane height of the view rectangle at session start.
    pub initial_view_height: f32,
    /// Smallest allowed view width (deepest zoom-in).
    pub min_view_width: f32,
    /// Largest allowed view width (furthest zoom-out).
    pub max_view_width: f32,
    /// Screen-pixel multiplier applied to wheel scrolling when panning.
    pub wheel_pan_multiplier: f32,
    /// Per-notch rescale factor for modifier-wheel zooming.
    pub wheel_zoom_step: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            initial_view_width: 12_000.0,
            initial_view_height: 8_000.0,
            min_view_width: 120.0,
            max_view_width: 1_200_000.0,
            wheel_pan_multiplier: 2.0,
            wheel_zoom_step: 1.1,
        }
    }
}

/// The visible window onto the unbounded plane.
///
/// Sole mapping between plane coordinates and screen pixels. Invariant:
/// `w, h > 0`, maintained by the zoom clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ViewBox {
    /// Initial view, centered on the plane origin.
    pub fn initial(params: &CameraParams) -> Self {
        Self {
            x: -params.initial_view_width / 2.0,
            y: -params.initial_view_height / 2.0,
            w: params.initial_view_width,
            h: params.initial_view_height,
        }
    }

    /// Plane units per screen pixel, per axis.
    fn units_per_pixel(&self, viewport: Rect) -> Vec2 {
        vec2(self.w / viewport.width(), self.h / viewport.height())
    }

    /// Screen pixels per plane unit, per axis.
    pub fn pixels_per_unit(&self, viewport: Rect) -> Vec2 {
        vec2(viewport.width() / self.w, viewport.height() / self.h)
    }

    pub fn plane_from_screen(&self, screen: Pos2, viewport: Rect) -> Pos2 {
        let k = self.units_per_pixel(viewport);
        pos2(
            self.x + (screen.x - viewport.left()) * k.x,
            self.y + (screen.y - viewport.top()) * k.y,
        )
    }

    pub fn screen_from_plane(&self, plane: Pos2, viewport: Rect) -> Pos2 {
        let k = self.pixels_per_unit(viewport);
        pos2(
            viewport.left() + (plane.x - self.x) * k.x,
            viewport.top() + (plane.y - self.y) * k.y,
        )
    }

    /// Shift the view so content follows a pointer moved by `delta` screen
    /// pixels. The delta is scaled by view-size over viewport-pixel-size, so
    /// panning feels 1:1 at any zoom level.
    pub fn pan_by_screen_delta(&mut self, delta: Vec2, viewport: Rect) {
        let k = self.units_per_pixel(viewport);
        self.x -= delta.x * k.x;
        self.y -= delta.y * k.y;
    }

    /// Rescale width and height by `scale`, keeping the plane point under
    /// `anchor_screen` at the same pixel.
    pub fn zoom_about_screen(
        &mut self,
        anchor_screen: Pos2,
        scale: f32,
        viewport: Rect,
        params: &CameraParams,
    ) {
        let anchor = self.plane_from_screen(anchor_screen, viewport);
        self.zoom_about_plane(anchor, scale, params);
    }

    /// Fixed-point rescale about a plane coordinate.
    pub fn zoom_about_plane(&mut self, anchor: Pos2, scale: f32, params: &CameraParams) {
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        let target_w = (self.w * scale).clamp(params.min_view_width, params.max_view_width);
        let applied = target_w / self.w;
        self.x = anchor.x - (anchor.x - self.x) * applied;
        self.y = anchor.y - (anchor.y - self.y) * applied;
        self.w *= applied;
        self.h *= applied;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(1200.0, 800.0))
    }

    #[test]
    fn test_initial_view_is_centered_on_origin() {
        let view = ViewBox::initial(&CameraParams::default());
        let center = view.plane_from_screen(viewport().center(), viewport());
        assert!(center.x.abs() < 0.1);
        assert!(center.y.abs() < 0.1);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let view = ViewBox { x: -350.0, y: 120.0, w: 9_000.0, h: 6_000.0 };
        let plane = pos2(123.45, 678.9);

        let screen = view.screen_from_plane(plane, viewport());
        let back = view.plane_from_screen(screen, viewport());

        assert!((back.x - plane.x).abs() < 0.01);
        assert!((back.y - plane.y).abs() < 0.01);
    }

    #[test]
    fn test_pan_keeps_pointer_over_same_plane_point() {
        let mut view = ViewBox::initial(&CameraParams::default());
        let start = pos2(300.0, 500.0);
        let end = pos2(417.0, 433.0);

        let grabbed = view.plane_from_screen(start, viewport());
        view.pan_by_screen_delta(end - start, viewport());
        let under_pointer = view.plane_from_screen(end, viewport());

        assert!((under_pointer.x - grabbed.x).abs() < 0.5);
        assert!((under_pointer.y - grabbed.y).abs() < 0.5);
    }

    #[test]
    fn test_zoom_fixed_point_invariant() {
        let params = CameraParams::default();
        for ratio in [0.5_f32, 0.75, 0.9, 1.1, 1.5, 2.0] {
            let mut view = ViewBox { x: 0.0, y: 0.0, w: 1000.0, h: 800.0 };
            let anchor_plane = pos2(100.0, 100.0);
            let before = view.screen_from_plane(anchor_plane, viewport());

            view.zoom_about_screen(before, ratio, viewport(), &params);
            let after = view.screen_from_plane(anchor_plane, viewport());

            assert!(
                (after.x - before.x).abs() < 0.05 && (after.y - before.y).abs() < 0.05,
                "anchor drifted for ratio {}: {:?} -> {:?}",
                ratio,
                before,
                after
            );
            assert!((view.w - 1000.0 * ratio).abs() < 0.01);
        }
    }

    #[test]
    fn test_zoom_is_clamped() {
        let params = CameraParams::default();
        let mut view = ViewBox::initial(&params);

        for _ in 0..200 {
            view.zoom_about_plane(pos2(0.0, 0.0), 0.5, &params);
        }
        assert!((view.w - params.min_view_width).abs() < 0.01);
        assert!(view.w > 0.0 && view.h > 0.0);

        for _ in 0..200 {
            view.zoom_about_plane(pos2(0.0, 0.0), 2.0, &params);
        }
        assert!((view.w - params.max_view_width).abs() < 0.1);
    }

    #[test]
    fn test_degenerate_scale_is_ignored() {
        let params = CameraParams::default();
        let mut view = ViewBox::initial(&params);
        let before = view;

        view.zoom_about_plane(pos2(0.0, 0.0), 0.0, &params);
        view.zoom_about_plane(pos2(0.0, 0.0), f32::NAN, &params);
        view.zoom_about_plane(pos2(0.0, 0.0), -1.0, &params);

        assert_eq!(view, before);
    }
}
