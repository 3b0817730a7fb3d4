//! Canvas viewport: pan, zoom and animated re-centering.
//!
//! The graph store talks to the viewport through `ViewportHandle`, so a
//! host can bind its own camera. `Camera` is the built-in implementation:
//! a center point plus zoom, with an ease-out transition advanced by
//! `tick`. Issuing a new `set_center` mid-flight retargets the transition
//! from wherever the camera currently is.

use serde::Serialize;
use swatch_core::model::{Position, Size};

/// Where the camera looks: the canvas point at the screen center, and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportState {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

/// The viewport operations the canvas needs.
pub trait ViewportHandle {
    /// Animate the center to canvas point (x, y) at `zoom` over `duration_ms`.
    /// A zero duration jumps immediately.
    fn set_center(&mut self, x: f32, y: f32, zoom: f32, duration_ms: u32);

    /// Pan by a screen-space delta.
    fn pan_by(&mut self, dx: f32, dy: f32);

    /// Multiply zoom by `factor`, keeping the canvas point under the screen
    /// point (sx, sy) fixed.
    fn zoom_at(&mut self, factor: f32, sx: f32, sy: f32);

    fn screen_to_canvas(&self, sx: f32, sy: f32) -> Position;

    fn state(&self) -> ViewportState;

    /// Advance any running transition. Returns whether one is still running.
    fn tick(&mut self, _elapsed_ms: f32) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: ViewportState,
    to: ViewportState,
    elapsed_ms: f32,
    duration_ms: f32,
}

impl Transition {
    fn sample(&self) -> ViewportState {
        let t = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        // Cubic ease-out
        let e = 1.0 - (1.0 - t).powi(3);
        let lerp = |a: f32, b: f32| a + (b - a) * e;
        ViewportState {
            x: lerp(self.from.x, self.to.x),
            y: lerp(self.from.y, self.to.y),
            zoom: lerp(self.from.zoom, self.to.zoom),
        }
    }

    fn finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

/// Built-in camera with zoom limits and an animated re-centering transition.
#[derive(Debug, Clone)]
pub struct Camera {
    current: ViewportState,
    screen: Size,
    min_zoom: f32,
    max_zoom: f32,
    transition: Option<Transition>,
}

impl Camera {
    pub fn new(screen: Size) -> Self {
        Self {
            current: ViewportState {
                x: screen.width / 2.0,
                y: screen.height / 2.0,
                zoom: 1.0,
            },
            screen,
            min_zoom: 0.1,
            max_zoom: 4.0,
            transition: None,
        }
    }

    pub fn with_zoom_limits(mut self, min_zoom: f32, max_zoom: f32) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom.max(min_zoom);
        self.current.zoom = self.clamp_zoom(self.current.zoom);
        self
    }

    pub fn resize(&mut self, screen: Size) {
        self.screen = screen;
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Final state of the running transition, or the current state.
    pub fn target(&self) -> ViewportState {
        self.transition.map(|t| t.to).unwrap_or(self.current)
    }

    /// Inverse of `screen_to_canvas`.
    pub fn canvas_to_screen(&self, x: f32, y: f32) -> Position {
        let s = self.state();
        Position::new(
            (x - s.x) * s.zoom + self.screen.width / 2.0,
            (y - s.y) * s.zoom + self.screen.height / 2.0,
        )
    }

    fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Freeze any running transition where it currently is.
    fn settle(&mut self) {
        if let Some(t) = self.transition.take() {
            self.current = t.sample();
        }
    }
}

impl ViewportHandle for Camera {
    fn set_center(&mut self, x: f32, y: f32, zoom: f32, duration_ms: u32) {
        let from = self.state();
        let to = ViewportState {
            x,
            y,
            zoom: self.clamp_zoom(zoom),
        };
        if duration_ms == 0 {
            self.transition = None;
            self.current = to;
            return;
        }
        log::trace!("camera: retarget to ({x}, {y}) zoom {} over {duration_ms}ms", to.zoom);
        self.current = from;
        self.transition = Some(Transition {
            from,
            to,
            elapsed_ms: 0.0,
            duration_ms: duration_ms as f32,
        });
    }

    fn pan_by(&mut self, dx: f32, dy: f32) {
        self.settle();
        self.current.x -= dx / self.current.zoom;
        self.current.y -= dy / self.current.zoom;
    }

    fn zoom_at(&mut self, factor: f32, sx: f32, sy: f32) {
        self.settle();
        let anchor = self.screen_to_canvas(sx, sy);
        let zoom = self.clamp_zoom(self.current.zoom * factor);
        self.current = ViewportState {
            x: anchor.x - (sx - self.screen.width / 2.0) / zoom,
            y: anchor.y - (sy - self.screen.height / 2.0) / zoom,
            zoom,
        };
    }

    fn screen_to_canvas(&self, sx: f32, sy: f32) -> Position {
        let s = self.state();
        Position::new(
            s.x + (sx - self.screen.width / 2.0) / s.zoom,
            s.y + (sy - self.screen.height / 2.0) / s.zoom,
        )
    }

    fn state(&self) -> ViewportState {
        self.transition.map(|t| t.sample()).unwrap_or(self.current)
    }

    fn tick(&mut self, elapsed_ms: f32) -> bool {
        let Some(t) = self.transition.as_mut() else {
            return false;
        };
        t.elapsed_ms += elapsed_ms;
        if t.finished() {
            self.current = t.to;
            self.transition = None;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn camera() -> Camera {
        Camera::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn screen_center_maps_to_camera_center() {
        let cam = camera();
        assert_eq!(cam.screen_to_canvas(400.0, 300.0), Position::new(400.0, 300.0));
        assert_eq!(cam.screen_to_canvas(0.0, 0.0), Position::new(0.0, 0.0));
    }

    #[test]
    fn animated_center_reaches_target() {
        let mut cam = camera();
        cam.set_center(1000.0, 500.0, 2.0, 500);
        assert!(cam.is_animating());
        assert_eq!(cam.state().x, 400.0);

        assert!(cam.tick(250.0));
        let mid = cam.state();
        // Ease-out: more than halfway after half the time
        assert!(mid.x > 700.0 && mid.x < 1000.0, "mid x = {}", mid.x);

        assert!(!cam.tick(250.0));
        assert_eq!(
            cam.state(),
            ViewportState {
                x: 1000.0,
                y: 500.0,
                zoom: 2.0
            }
        );
    }

    #[test]
    fn retarget_starts_from_current_position() {
        let mut cam = camera();
        cam.set_center(1000.0, 300.0, 1.0, 500);
        cam.tick(250.0);
        let mid = cam.state();
        cam.set_center(0.0, 300.0, 1.0, 500);
        assert_eq!(cam.state(), mid);
        assert_eq!(cam.target().x, 0.0);
    }

    #[test]
    fn zoom_is_clamped_and_anchored() {
        let mut cam = camera();
        let before = cam.screen_to_canvas(100.0, 100.0);
        cam.zoom_at(2.0, 100.0, 100.0);
        assert_eq!(cam.state().zoom, 2.0);
        assert_eq!(cam.screen_to_canvas(100.0, 100.0), before);

        cam.zoom_at(100.0, 0.0, 0.0);
        assert_eq!(cam.state().zoom, 4.0);
        cam.zoom_at(0.0001, 0.0, 0.0);
        assert_eq!(cam.state().zoom, 0.1);
    }

    #[test]
    fn pan_moves_content_with_pointer() {
        let mut cam = camera();
        cam.zoom_at(2.0, 400.0, 300.0);
        cam.pan_by(100.0, 0.0);
        // Content dragged right by 100px at 2x → camera moves left 50 canvas units
        assert_eq!(cam.state().x, 350.0);
        let p = cam.canvas_to_screen(350.0, 300.0);
        assert_eq!(p, Position::new(400.0, 300.0));
    }
}
