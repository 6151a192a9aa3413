//! Pointer tracking in normalized surface coordinates.
//!
//! Event handlers mutate [`PointerState`] directly; the render loop calls
//! [`PointerState::advance`] once per frame. Several moves between two
//! frames simply overwrite each other.

/// Smoothing while the pointer is moving over the surface.
pub const MOVE_SMOOTHING: f32 = 0.035;
/// Smoothing after enter/leave, slow enough for the ripple to settle.
pub const SETTLE_SMOOTHING: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const CENTER: Point = Point::new(0.5, 0.5);
}

/// Client-space box of the surface, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps client coordinates into `[0,1]²` relative to `rect`. Positions
/// outside the rect are clamped; a degenerate axis maps to 0.
pub fn normalize(client_x: f64, client_y: f64, rect: &SurfaceRect) -> Point {
    fn axis(v: f64, origin: f64, extent: f64) -> f32 {
        if extent <= 0.0 {
            return 0.0;
        }
        ((v - origin) / extent).clamp(0.0, 1.0) as f32
    }
    Point::new(
        axis(client_x, rect.left, rect.width),
        axis(client_y, rect.top, rect.height),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub current: Point,
    pub target: Point,
    pub previous: Point,
    pub smoothing: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            current: Point::CENTER,
            target: Point::CENTER,
            previous: Point::CENTER,
            smoothing: SETTLE_SMOOTHING,
        }
    }
}

impl PointerState {
    pub fn on_move(&mut self, p: Point) {
        self.smoothing = MOVE_SMOOTHING;
        self.previous = self.target;
        self.target = p;
    }

    pub fn on_enter(&mut self, p: Point) {
        self.smoothing = SETTLE_SMOOTHING;
        self.current = p;
        self.target = p;
    }

    /// Relax back along the path the pointer came from.
    pub fn on_leave(&mut self) {
        self.smoothing = SETTLE_SMOOTHING;
        self.target = self.previous;
    }

    /// One frame of exponential easing of `current` toward `target`.
    /// Frame-rate dependent.
    pub fn advance(&mut self) {
        self.current.x += (self.target.x - self.current.x) * self.smoothing;
        self.current.y += (self.target.y - self.current.y) * self.smoothing;
    }
}
