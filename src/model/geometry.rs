//! Rectangles and quads in page space.
//!
//! Coordinates use a top-left origin: `y` grows downward, so `y0` is the
//! top edge and `y1` the bottom edge of a box.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Vertical midpoint.
    pub fn center_y(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    /// A rectangle is empty when it has no area.
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Whether both rectangles share a region of positive area.
    ///
    /// Touching edges do not count, and an empty rectangle intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x0 < other.x1
            && other.x0 < self.x1
            && self.y0 < other.y1
            && other.y0 < self.y1
    }

    /// Shrink the rectangle vertically by `margin` on the top and bottom.
    pub fn shrink_vertical(&self, margin: f64) -> Rect {
        Rect {
            x0: self.x0,
            y0: self.y0 + margin,
            x1: self.x1,
            y1: self.y1 - margin,
        }
    }

    /// Smallest rectangle that contains both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Four-point region, as used by text markup annotations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub points: [Point; 4],
}

impl Quad {
    /// Create a quad from its four corners.
    pub fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// Build a quad covering an axis-aligned rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new([
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        ])
    }

    /// Bounding rectangle of the four corners.
    pub fn rect(&self) -> Rect {
        let mut rect = Rect::new(f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for p in &self.points {
            rect.x0 = rect.x0.min(p.x);
            rect.y0 = rect.y0.min(p.y);
            rect.x1 = rect.x1.max(p.x);
            rect.y1 = rect.y1.max(p.y);
        }
        rect
    }
}

/// Value-equality key for a piece of text at a position.
///
/// Floating point coordinates are compared bitwise so the key can live in a
/// hash set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordKey {
    bounds: [u64; 4],
    text: String,
}

impl WordKey {
    pub fn new(rect: &Rect, text: &str) -> Self {
        Self {
            bounds: [
                rect.x0.to_bits(),
                rect.y0.to_bits(),
                rect.x1.to_bits(),
                rect.y1.to_bits(),
            ],
            text: text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::new(10.0, 20.0, 50.0, 60.0);
        assert_eq!(rect.width(), 40.0);
        assert_eq!(rect.height(), 40.0);
        assert_eq!(rect.center_y(), 40.0);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(a.intersects(&a));
        // Shared edge only
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!a.intersects(&Rect::new(12.0, 12.0, 14.0, 14.0)));
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let flat = Rect::new(0.0, 5.0, 10.0, 5.0);
        assert!(flat.is_empty());
        assert!(!flat.intersects(&Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_shrink_vertical() {
        let rect = Rect::new(0.0, 10.0, 20.0, 22.0).shrink_vertical(2.0);
        assert_eq!(rect, Rect::new(0.0, 12.0, 20.0, 20.0));
    }

    #[test]
    fn test_quad_rect() {
        let quad = Quad::new([
            Point::new(10.0, 5.0),
            Point::new(40.0, 5.0),
            Point::new(10.0, 17.0),
            Point::new(40.0, 17.0),
        ]);
        assert_eq!(quad.rect(), Rect::new(10.0, 5.0, 40.0, 17.0));
        assert_eq!(Quad::from_rect(quad.rect()).rect(), quad.rect());
    }

    #[test]
    fn test_word_key_equality() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(WordKey::new(&rect, "word"), WordKey::new(&rect, "word"));
        assert_ne!(WordKey::new(&rect, "word"), WordKey::new(&rect, "other"));
    }
}
