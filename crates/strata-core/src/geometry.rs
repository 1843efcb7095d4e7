//! Basic geometry types for sizing and layout.
//!
//! Everything the engine measures is expressed in these types. Lengths are
//! `f32` logical points. Most algorithms are written once in terms of a
//! *cross* axis (perpendicular to scrolling) and an *along* axis (the scroll
//! direction); [`Axis`] converts between that frame and width/height.

use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Clamp both dimensions to at least `minimum`.
    #[inline]
    pub fn at_least(self, minimum: f32) -> Self {
        Self {
            width: self.width.max(minimum),
            height: self.height.max(minimum),
        }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right edge x coordinate.
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge y coordinate.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Translate the rectangle by an offset.
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }
}

/// Insets around a section's content.
///
/// Insets define the spacing between a section's items and the section's
/// edges, in container coordinates (not axis-relative).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    /// Left inset.
    pub left: f32,
    /// Top inset.
    pub top: f32,
    /// Right inset.
    pub right: f32,
    /// Bottom inset.
    pub bottom: f32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Create new insets.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create uniform insets (same value on all sides).
    pub fn uniform(inset: f32) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Create symmetric insets (same horizontal and vertical).
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Total horizontal inset (left + right).
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical inset (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Total inset across the given axis' cross direction.
    #[inline]
    pub fn cross(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.horizontal(),
            Axis::Horizontal => self.vertical(),
        }
    }

    /// Total inset along the given axis.
    #[inline]
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.vertical(),
            Axis::Horizontal => self.horizontal(),
        }
    }

    /// Leading inset on the cross axis (left for vertical scrolling).
    #[inline]
    pub fn cross_leading(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.left,
            Axis::Horizontal => self.top,
        }
    }

    /// Leading inset along the axis (top for vertical scrolling).
    #[inline]
    pub fn along_leading(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.top,
            Axis::Horizontal => self.left,
        }
    }
}

/// The scroll direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Content scrolls top to bottom; the cross axis is the width.
    #[default]
    Vertical,
    /// Content scrolls left to right; the cross axis is the height.
    Horizontal,
}

impl Axis {
    /// Get the perpendicular axis.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Length of `size` perpendicular to scrolling.
    #[inline]
    pub fn cross_of(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// Length of `size` in the scroll direction.
    #[inline]
    pub fn along_of(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Build a size from cross and along lengths.
    #[inline]
    pub fn size(self, cross: f32, along: f32) -> Size {
        match self {
            Self::Vertical => Size::new(cross, along),
            Self::Horizontal => Size::new(along, cross),
        }
    }

    /// Build a rectangle from axis-relative origin and lengths.
    #[inline]
    pub fn rect(self, cross_origin: f32, along_origin: f32, cross: f32, along: f32) -> Rect {
        match self {
            Self::Vertical => Rect::new(cross_origin, along_origin, cross, along),
            Self::Horizontal => Rect::new(along_origin, cross_origin, along, cross),
        }
    }
}
