//! Surface size and the orthographic camera that maps the full-surface
//! quad onto it.

use glam::{Mat4, Vec3};

use crate::layout::BitmapSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Camera bounds centred on the origin, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

const NEAR: f32 = -1.0;
const FAR: f32 = 1.0;

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn bitmap(&self) -> BitmapSize {
        BitmapSize::for_surface(self.width, self.height)
    }

    pub fn bounds(&self) -> OrthoBounds {
        let hw = self.width as f32 / 2.0;
        let hh = self.height as f32 / 2.0;
        OrthoBounds {
            left: -hw,
            right: hw,
            top: hh,
            bottom: -hh,
        }
    }

    /// Scales the unit quad (`-0.5..0.5`) to the surface size.
    pub fn model(&self) -> Mat4 {
        Mat4::from_scale(Vec3::new(self.width as f32, self.height as f32, 1.0))
    }
}

impl OrthoBounds {
    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh_gl(self.left, self.right, self.bottom, self.top, NEAR, FAR)
    }
}
