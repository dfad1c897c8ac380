use crate::geometry::Rect;
use crate::renderer::text::Quad;

use super::Widget;

// ── CornerLayout ─────────────────────────────────────────────────────────────

/// Container holding at most one child, pinned to the top-right corner of
/// its allocation at the child's natural size.
///
/// All rectangles are local to the container: `(0, 0)` is its top-left.
pub struct CornerLayout<W> {
    child: Option<W>,
    allocation: Rect,
    child_box: Rect,
    needs_relayout: bool,
}

impl<W: Widget> CornerLayout<W> {
    pub fn new() -> Self {
        Self {
            child: None,
            allocation: Rect::default(),
            child_box: Rect::default(),
            needs_relayout: false,
        }
    }

    /// Insert the child.  Fails, handing the widget back, when a child is
    /// already present.
    pub fn add(&mut self, child: W) -> Result<(), W> {
        if self.child.is_some() {
            log::warn!("corner layout already has a child; ignoring add");
            return Err(child);
        }
        self.child = Some(child);
        self.needs_relayout = true;
        Ok(())
    }

    /// Detach and return the child, if any.
    pub fn remove(&mut self) -> Option<W> {
        let child = self.child.take();
        if child.is_some() {
            self.child_box = Rect::default();
            self.needs_relayout = true;
        }
        child
    }

    pub fn child(&self) -> Option<&W> {
        self.child.as_ref()
    }

    pub fn child_mut(&mut self) -> Option<&mut W> {
        self.child.as_mut()
    }

    /// Iterate over the children (zero or one).
    pub fn children(&self) -> impl Iterator<Item = &W> {
        self.child.iter()
    }

    /// Size the container to `allocation` and place the child in its
    /// top-right corner.  Clears any pending relayout.
    pub fn allocate(&mut self, allocation: Rect) {
        self.allocation = allocation;
        self.needs_relayout = false;

        let Some(child) = self.child.as_mut() else {
            self.child_box = Rect::default();
            return;
        };
        child.take_relayout();

        let (w, h) = child.preferred_size();
        let right = allocation.width();
        self.child_box = Rect::new(right - w, 0, right, h);
    }

    pub fn allocation(&self) -> Rect {
        self.allocation
    }

    /// Where the child was last placed, in container coordinates.
    pub fn child_box(&self) -> Option<Rect> {
        self.child.as_ref().map(|_| self.child_box)
    }

    /// The child's quads, moved into container coordinates.
    pub fn draw(&self) -> Vec<Quad> {
        let Some(child) = self.child.as_ref() else {
            return Vec::new();
        };
        child
            .draw()
            .iter()
            .map(|q| q.translate(self.child_box.x1, self.child_box.y1))
            .collect()
    }

    pub fn needs_relayout(&self) -> bool {
        self.needs_relayout || self.child.as_ref().is_some_and(Widget::needs_relayout)
    }
}

impl<W: Widget> Default for CornerLayout<W> {
    fn default() -> Self {
        Self::new()
    }
}
