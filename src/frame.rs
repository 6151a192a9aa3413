//! Per-frame state shared between the animation task and the GPU.

use std::cell::Cell;
use std::rc::Rc;

use crate::pointer::PointerState;

/// Uniform values for one draw. Y is flipped: surface coordinates grow
/// downward, texture coordinates grow upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub mouse: [f32; 2],
    pub prev_mouse: [f32; 2],
}

impl FrameUniforms {
    pub fn from_pointer(p: &PointerState) -> Self {
        Self {
            mouse: [p.current.x, 1.0 - p.current.y],
            prev_mouse: [p.previous.x, 1.0 - p.previous.y],
        }
    }
}

/// Eases the pointer one step and returns what the shader should see.
pub fn tick(pointer: &mut PointerState) -> FrameUniforms {
    pointer.advance();
    FrameUniforms::from_pointer(pointer)
}

/// Cancellation flag for the repeating frame task. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        !self.0.replace(true)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Monotonic event count that wraps instead of overflowing.
#[derive(Debug, Default)]
pub struct Counter(Cell<u32>);

impl Counter {
    pub fn bump(&self) {
        self.0.set(self.0.get().wrapping_add(1));
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}
