//! Rubber-band selection geometry.
//!
//! Everything here works in *content* coordinates: a viewport point plus the
//! container's scroll offset. Rows are laid out at fixed height, so their
//! bounding boxes are computed rather than measured.

use indexmap::IndexSet;

use crate::config::drag::{EDGE_MARGIN, SCROLL_SPEED};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with `left <= right` and `top <= bottom`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Normalized rectangle spanned by two corners in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Overlap test; rectangles that only touch do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Fixed-height row layout of the list content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowLayout {
    pub row_height: f64,
    /// Offset of the first row from the top of the content (header, padding).
    pub top_offset: f64,
    pub width: f64,
}

impl RowLayout {
    /// Bounding box of row `index` in content coordinates.
    pub fn bounds(&self, index: usize) -> Rect {
        let top = self.top_offset + index as f64 * self.row_height;
        Rect {
            left: 0.0,
            top,
            right: self.width,
            bottom: top + self.row_height,
        }
    }

    /// Row under a content point, if any.
    pub fn row_at(&self, point: Point, rows: usize) -> Option<usize> {
        if self.row_height <= 0.0 || point.y < self.top_offset {
            return None;
        }
        let index = ((point.y - self.top_offset) / self.row_height) as usize;
        (index < rows).then_some(index)
    }
}

/// Scroll state of the list container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub scroll_left: f64,
    /// Visible size of the container.
    pub width: f64,
    pub height: f64,
    /// Total scrollable height.
    pub content_height: f64,
}

impl Viewport {
    /// Convert a container-relative point to content coordinates.
    pub fn to_content(&self, point: Point) -> Point {
        Point::new(point.x + self.scroll_left, point.y + self.scroll_top)
    }

    /// Largest valid `scroll_top`.
    pub fn max_scroll_top(&self) -> f64 {
        (self.content_height - self.height).max(0.0)
    }

    /// Scroll by `delta`, clamped to the scrollable range. Returns the new
    /// offset.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        self.scroll_top = (self.scroll_top + delta).clamp(0.0, self.max_scroll_top());
        self.scroll_top
    }
}

/// Auto-scroll step for a pointer at container-relative `y`.
///
/// Negative near the top edge, positive near the bottom, zero elsewhere.
pub fn auto_scroll_delta(y: f64, height: f64) -> f64 {
    if y < EDGE_MARGIN {
        -SCROLL_SPEED
    } else if y > height - EDGE_MARGIN {
        SCROLL_SPEED
    } else {
        0.0
    }
}

/// An active drag selection.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSelect {
    origin: Point,
    current: Point,
    /// Selection at drag start, unioned with the hit rows when additive.
    base: IndexSet<String>,
    additive: bool,
}

impl DragSelect {
    /// Start at a content point. `base` is the selection to keep when
    /// `additive` is set (shift/primary held at mousedown).
    pub fn start(origin: Point, base: IndexSet<String>, additive: bool) -> Self {
        Self {
            origin,
            current: origin,
            base,
            additive,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn is_additive(&self) -> bool {
        self.additive
    }

    /// Move the free corner to a content point.
    pub fn update(&mut self, current: Point) {
        self.current = current;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.origin, self.current)
    }

    /// Selection implied by the current rectangle over `order`.
    pub fn compute(&self, order: &[String], layout: &RowLayout) -> IndexSet<String> {
        let rect = self.rect();
        let mut selected = if self.additive {
            self.base.clone()
        } else {
            IndexSet::new()
        };
        for (index, path) in order.iter().enumerate() {
            if rect.intersects(&layout.bounds(index)) {
                selected.insert(path.clone());
            }
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: RowLayout = RowLayout {
        row_height: 20.0,
        top_offset: 0.0,
        width: 400.0,
    };

    fn order() -> Vec<String> {
        (0..10).map(|i| format!("/d/{i}")).collect()
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let r = Rect::from_corners(Point::new(10.0, 50.0), Point::new(0.0, 5.0));
        assert_eq!(r, Rect { left: 0.0, top: 5.0, right: 10.0, bottom: 50.0 });
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 45.0);
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = LAYOUT.bounds(0);
        let b = LAYOUT.bounds(1);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_drag_selects_intersected_rows() {
        let mut drag = DragSelect::start(Point::new(5.0, 25.0), IndexSet::new(), false);
        drag.update(Point::new(50.0, 65.0));
        let hit = drag.compute(&order(), &LAYOUT);
        assert_eq!(hit.into_iter().collect::<Vec<_>>(), vec!["/d/1", "/d/2", "/d/3"]);
    }

    #[test]
    fn test_drag_upwards_is_the_same_rect() {
        let mut drag = DragSelect::start(Point::new(50.0, 65.0), IndexSet::new(), false);
        drag.update(Point::new(5.0, 25.0));
        assert_eq!(drag.compute(&order(), &LAYOUT).len(), 3);
    }

    #[test]
    fn test_additive_drag_keeps_base() {
        let base: IndexSet<String> = ["/d/9".to_string()].into_iter().collect();
        let mut drag = DragSelect::start(Point::new(5.0, 1.0), base.clone(), true);
        drag.update(Point::new(5.0, 10.0));
        let hit = drag.compute(&order(), &LAYOUT);
        assert!(hit.contains("/d/9"));
        assert!(hit.contains("/d/0"));

        let replace = DragSelect::start(Point::new(5.0, 1.0), base, false);
        assert!(!replace.compute(&order(), &LAYOUT).contains("/d/9"));
    }

    #[test]
    fn test_scroll_compensation() {
        let viewport = Viewport {
            scroll_top: 100.0,
            height: 200.0,
            content_height: 1000.0,
            ..Default::default()
        };
        let p = viewport.to_content(Point::new(5.0, 10.0));
        assert_eq!(p, Point::new(5.0, 110.0));
        assert_eq!(LAYOUT.row_at(p, 10), Some(5));
    }

    #[test]
    fn test_auto_scroll_delta() {
        assert_eq!(auto_scroll_delta(10.0, 300.0), -SCROLL_SPEED);
        assert_eq!(auto_scroll_delta(150.0, 300.0), 0.0);
        assert_eq!(auto_scroll_delta(290.0, 300.0), SCROLL_SPEED);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut viewport = Viewport {
            height: 200.0,
            content_height: 300.0,
            ..Default::default()
        };
        assert_eq!(viewport.scroll_by(-12.0), 0.0);
        assert_eq!(viewport.scroll_by(500.0), 100.0);
    }
}
