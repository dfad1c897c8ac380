// ── UI nodes ─────────────────────────────────────────────────────────────────

pub mod corner;
pub mod label;

pub use corner::CornerLayout;
pub use label::{DIGIT_CAPACITY, DigitString, NumberLabel};

use crate::renderer::text::Quad;

/// Something a layout container can size and paint.  No GPU state; fully
/// testable.
pub trait Widget {
    /// Natural `(width, height)` in pixels.
    fn preferred_size(&self) -> (i32, i32);

    /// Quads in widget-local coordinates.
    fn draw(&self) -> Vec<Quad>;

    fn needs_relayout(&self) -> bool {
        false
    }

    /// Clear the relayout flag, returning its previous state.
    fn take_relayout(&mut self) -> bool {
        false
    }
}
