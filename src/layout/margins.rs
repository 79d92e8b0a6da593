use crate::units::{Mm, Px};
use serde::{Deserialize, Serialize};

/// Margins are the blank border between the edge of the page and the area text is
/// flowed into. They are given in millimetres and converted once to pixels when the
/// layout metrics are resolved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins<U = Mm> {
    pub top: U,
    pub right: U,
    pub bottom: U,
    pub left: U,
}

impl<U: Copy> Margins<U> {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: U, right: U, bottom: U, left: U) -> Margins<U> {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<U>>(value: D) -> Margins<U> {
        let value: U = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric<D: Into<U>>(vertical: D, horizontal: D) -> Margins<U> {
        let vertical: U = vertical.into();
        let horizontal: U = horizontal.into();
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Apply `f` to every side, e.g. to change units
    pub fn map<V, F: Fn(U) -> V>(&self, f: F) -> Margins<V> {
        Margins {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}

impl Margins<Mm> {
    /// Create margins where all values are 0.0
    pub fn empty() -> Margins<Mm> {
        Margins::all(Mm(0.0))
    }

    /// Clamp every side into `[0, max]`. Non-finite sides collapse to 0.
    pub fn clamped(&self, max: Mm) -> Margins<Mm> {
        self.map(|side| {
            if side.is_finite() {
                side.max(Mm(0.0)).min(max)
            } else {
                Mm(0.0)
            }
        })
    }

    pub fn to_px(&self) -> Margins<Px> {
        self.map(Px::from)
    }
}

impl<U: Copy + std::ops::Add<Output = U>> Margins<U> {
    /// Combined left and right margin
    pub fn horizontal(&self) -> U {
        self.left + self.right
    }

    /// Combined top and bottom margin
    pub fn vertical(&self) -> U {
        self.top + self.bottom
    }
}
