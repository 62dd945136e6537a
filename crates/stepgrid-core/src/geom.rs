//! Grid coordinates.
//!
//! `x` is the column and `y` the row, with `y` growing downward, so "up" is
//! `(0, -1)`.

use std::fmt;
use std::ops::{Add, Sub};

/// A cell position, or an offset between two cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `(|dx|, |dy|)` between `self` and `other`.
    #[inline]
    pub fn abs_diff(self, other: Point) -> (i32, i32) {
        ((self.x - other.x).abs(), (self.y - other.y).abs())
    }

    /// Whether this offset moves along both axes.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.x != 0 && self.y != 0
    }
}

/// Row-major: by row, then by column.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Map files store positions as `[x, y]`.
impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [i32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Half-open rectangle of cells, `min` inclusive and `max` exclusive.
///
/// Cells are numbered row-major from `min`; searches use that number to
/// index their per-cell tables.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Rectangle spanned by two corners, in any order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.width() as usize * self.height() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Row-major cell number of `p`.
    #[inline]
    pub fn index_of(self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let dx = (p.x - self.min.x) as usize;
        let dy = (p.y - self.min.y) as usize;
        Some(dy * self.width() as usize + dx)
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn point_at(self, i: usize) -> Option<Point> {
        if i >= self.len() {
            return None;
        }
        let w = self.width() as usize;
        Some(Point::new(
            self.min.x + (i % w) as i32,
            self.min.y + (i / w) as i32,
        ))
    }

    /// Every cell, row-major.
    pub fn iter(self) -> impl ExactSizeIterator<Item = Point> {
        let w = self.width().max(1) as usize;
        (0..self.len()).map(move |i| Point::new(self.min.x + (i % w) as i32, self.min.y + (i / w) as i32))
    }
}
