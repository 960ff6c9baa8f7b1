//! Pointer/touch translation into the fixed-size `pointers` uniform.
//!
//! Touches and the emulated mouse pointer both arrive as a [`PointerSource`]
//! in client (CSS pixel) coordinates. [`PointerArray::write`] normalizes
//! either variant into device pixels with a bottom-left origin, which is
//! the space `gl_FragCoord` uses in the fragment shader.
//!
//! Unused slots are always zero. The shader treats `pointers[0].x > 0` as
//! "input active" and otherwise falls back to its auto-orbit camera.

use glam::Vec2;

/// Maximum number of simultaneous pointers the shader accepts.
pub const MAX_POINTERS: usize = 10;

/// Length of the flattened `pointers` uniform (two floats per pointer).
pub const POINTER_ARRAY_LEN: usize = MAX_POINTERS * 2;

/// A batch of input positions in client coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSource {
    /// Every active touch point, in touch-list order.
    MultiTouch(Vec<Vec2>),
    /// A single pointer, e.g. a pressed mouse button.
    SinglePointer(Vec2),
}

impl PointerSource {
    /// Returns the client-space points carried by this source.
    pub fn points(&self) -> &[Vec2] {
        match self {
            PointerSource::MultiTouch(points) => points,
            PointerSource::SinglePointer(point) => std::slice::from_ref(point),
        }
    }
}

/// Flattened `vec2[MAX_POINTERS]` uniform data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerArray {
    coords: [f32; POINTER_ARRAY_LEN],
}

impl PointerArray {
    /// Creates an all-zero array ("no input").
    pub fn new() -> Self {
        Self {
            coords: [0.0; POINTER_ARRAY_LEN],
        }
    }

    /// Sets every coordinate to zero.
    pub fn clear(&mut self) {
        self.coords = [0.0; POINTER_ARRAY_LEN];
    }

    /// Replaces the contents with the points of `source`.
    ///
    /// Each point becomes `(x * pixel_ratio, canvas_height - y * pixel_ratio)`.
    /// Points beyond [`MAX_POINTERS`] are dropped. Returns the number of
    /// points written.
    pub fn write(&mut self, source: &PointerSource, canvas_height: f32, pixel_ratio: f32) -> usize {
        self.clear();

        let points = source.points();
        if points.len() > MAX_POINTERS {
            log::warn!(
                "{} pointers active, only the first {MAX_POINTERS} are forwarded",
                points.len()
            );
        }

        let mut written = 0;
        for (slot, point) in self.coords.chunks_exact_mut(2).zip(points) {
            slot[0] = point.x * pixel_ratio;
            slot[1] = canvas_height - point.y * pixel_ratio;
            written += 1;
        }
        written
    }

    /// Returns the device-space position stored at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.coords
            .chunks_exact(2)
            .nth(index)
            .map(|pair| Vec2::new(pair[0], pair[1]))
    }

    /// Returns `true` when every coordinate is zero.
    pub fn is_empty(&self) -> bool {
        self.coords.iter().all(|&c| c == 0.0)
    }

    /// Returns the flattened coordinates, ready for `uniform2fv`.
    pub fn as_slice(&self) -> &[f32] {
        &self.coords
    }
}

impl Default for PointerArray {
    fn default() -> Self {
        Self::new()
    }
}

/// Input state machine feeding the [`PointerArray`].
///
/// States are simply "no pointer" and "pointer(s) active". Mouse input
/// emulates touch: moves only count between mouse-down and mouse-up, so
/// hovering never moves the camera.
#[derive(Debug, Clone)]
pub struct PointerInput {
    pointers: PointerArray,
    mouse_enabled: bool,
    mouse_tracking: bool,
}

impl PointerInput {
    /// Creates an empty input state.
    ///
    /// `mouse_enabled` should be `false` on coarse-pointer (touch-primary)
    /// devices, where mouse events are synthesized from touches and would
    /// otherwise be counted twice.
    pub fn new(mouse_enabled: bool) -> Self {
        Self {
            pointers: PointerArray::new(),
            mouse_enabled,
            mouse_tracking: false,
        }
    }

    /// Current uniform contents.
    pub fn pointers(&self) -> &PointerArray {
        &self.pointers
    }

    /// Whether mouse events are honoured at all.
    pub fn mouse_enabled(&self) -> bool {
        self.mouse_enabled
    }

    /// Whether a mouse button is currently held.
    pub fn is_mouse_tracking(&self) -> bool {
        self.mouse_tracking
    }

    /// Handles `touchstart` and `touchmove`.
    pub fn touch(&mut self, touches: &[Vec2], canvas_height: f32, pixel_ratio: f32) {
        self.pointers.write(
            &PointerSource::MultiTouch(touches.to_vec()),
            canvas_height,
            pixel_ratio,
        );
    }

    /// Handles `touchend`.
    pub fn touch_end(&mut self) {
        self.pointers.clear();
    }

    /// Handles `mousedown`. Returns `true` if tracking started.
    pub fn mouse_down(&mut self) -> bool {
        if !self.mouse_enabled {
            return false;
        }
        self.mouse_tracking = true;
        true
    }

    /// Handles `mousemove`. Ignored unless a button is held.
    pub fn mouse_move(&mut self, position: Vec2, canvas_height: f32, pixel_ratio: f32) {
        if !self.mouse_tracking {
            return;
        }
        self.pointers.write(
            &PointerSource::SinglePointer(position),
            canvas_height,
            pixel_ratio,
        );
    }

    /// Handles `mouseup`. Returns `true` if tracking was active.
    pub fn mouse_up(&mut self) -> bool {
        if !self.mouse_enabled {
            return false;
        }
        let was_tracking = self.mouse_tracking;
        self.mouse_tracking = false;
        self.pointers.clear();
        was_tracking
    }
}
