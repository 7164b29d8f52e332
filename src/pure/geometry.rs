//! Geometry primitives
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pure::Orientation;

/// The most negative coordinate the X server accepts: windows positioned here are "parked"
/// off screen.
pub const OFFSCREEN: i32 = -(1 << 15);

/// An x,y coordinate pair
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Point {
    /// An absolute x coordinate relative to the root window
    pub x: i32,
    /// An absolute y coordinate relative to the root window
    pub y: i32,
}

impl Point {
    /// Create a new Point.
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from(raw: (i32, i32)) -> Self {
        let (x, y) = raw;

        Self { x, y }
    }
}

/// An X window / screen position: top left corner + extent.
///
/// The extent is exact: a `Rect` of width `w` covers the columns `x..x + w`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Rect {
    /// The x-coordinate of the top left corner of this rect
    pub x: i32,
    /// The y-coordinate of the top left corner of this rect
    pub y: i32,
    /// The width of this rect
    pub w: u32,
    /// The height of this rect
    pub h: u32,
}

impl Rect {
    /// Create a new Rect.
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Rect {
        Rect { x, y, w, h }
    }

    /// A rect of the given size parked at the off screen position.
    pub const fn offscreen(w: u32, h: u32) -> Rect {
        Rect::new(OFFSCREEN, OFFSCREEN, w, h)
    }

    /// Whether or not this rect sits at the off screen parking position.
    pub fn is_offscreen(&self) -> bool {
        self.x == OFFSCREEN
    }

    /// The midpoint of this rectangle.
    ///
    /// Odd width or height values will round their midpoint down.
    /// ```
    /// # use trellis::pure::geometry::{Point, Rect};
    /// let r = Rect::new(10, 20, 31, 40);
    ///
    /// assert_eq!(r.midpoint(), Point::new(25, 40));
    /// ```
    pub fn midpoint(&self) -> Point {
        Point {
            x: self.x + (self.w / 2) as i32,
            y: self.y + (self.h / 2) as i32,
        }
    }

    /// Check whether this Rect contains `p`.
    pub fn contains_point<P>(&self, p: P) -> bool
    where
        P: Into<Point>,
    {
        let p = p.into();
        let (dx, dy) = (p.x as i64 - self.x as i64, p.y as i64 - self.y as i64);

        (0..self.w as i64).contains(&dx) && (0..self.h as i64).contains(&dy)
    }

    /// Shrink this rect by the given pixel border on every side. The resulting `Rect` will
    /// always have a minimum width and height of 1.
    /// ```
    /// # use trellis::pure::geometry::Rect;
    /// let r = Rect::new(0, 0, 100, 200);
    ///
    /// assert_eq!(r.shrink_in(10), Rect::new(10, 10, 80, 180));
    /// assert_eq!(r.shrink_in(100), Rect::new(100, 100, 1, 1));
    /// ```
    pub fn shrink_in(&self, border: u32) -> Self {
        let shrink = |d: u32| if d <= 2 * border { 1 } else { d - 2 * border };

        Self {
            x: self.x + border as i32,
            y: self.y + border as i32,
            w: shrink(self.w),
            h: shrink(self.h),
        }
    }

    /// The `i`th of `n` equal divisions of this rect along the given axis.
    ///
    /// Child `i` spans `[i * W / n, (i + 1) * W / n)` so the divisions always sum
    /// exactly to the extent of the parent.
    pub fn nth_division(&self, orientation: Orientation, i: u32, n: u32) -> Self {
        let n = n.max(1) as u64;
        let span = |extent: u32| {
            let lo = i as u64 * extent as u64 / n;
            let hi = (i as u64 + 1) * extent as u64 / n;
            (lo as i32, (hi - lo) as u32)
        };

        match orientation {
            Orientation::Horizontal => {
                let (dx, w) = span(self.w);
                Self {
                    x: self.x + dx,
                    w,
                    ..*self
                }
            }
            Orientation::Vertical => {
                let (dy, h) = span(self.h);
                Self {
                    y: self.y + dy,
                    h,
                    ..*self
                }
            }
        }
    }

    /// Split this rect into `n` exact divisions along the given axis.
    pub fn split_proportional(&self, orientation: Orientation, n: u32) -> Vec<Rect> {
        (0..n.max(1))
            .map(|i| self.nth_division(orientation, i, n))
            .collect()
    }
}
