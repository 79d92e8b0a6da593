//! Physical and screen units used when resolving page geometry.
//!
//! Input geometry is given in millimetres ([Mm]) and type sizes in points ([Pt]); everything the
//! flow engine touches is in CSS pixels ([Px]) at 96 pixels per inch.

use derive_more::{Add, AddAssign, From, Into, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul};

pub const PX_PER_INCH: f32 = 96.0;
pub const MM_PER_INCH: f32 = 25.4;
pub const PT_PER_INCH: f32 = 72.0;

macro_rules! unit {
    ($(#[$meta:meta])* $name:ident, $suffix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Default,
            Copy,
            Clone,
            PartialEq,
            PartialOrd,
            Add,
            AddAssign,
            Sub,
            SubAssign,
            Sum,
            From,
            Into,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub f32);

        impl $name {
            pub fn max(self, other: $name) -> $name {
                $name(self.0.max(other.0))
            }

            pub fn min(self, other: $name) -> $name {
                $name(self.0.min(other.0))
            }

            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl Mul<f32> for $name {
            type Output = $name;

            fn mul(self, rhs: f32) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl Div<f32> for $name {
            type Output = $name;

            fn div(self, rhs: f32) -> $name {
                $name(self.0 / rhs)
            }
        }

        /// Ratio of two lengths in the same unit
        impl Div<$name> for $name {
            type Output = f32;

            fn div(self, rhs: $name) -> f32 {
                self.0 / rhs.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", self.0, $suffix)
            }
        }
    };
}

unit!(
    /// Millimetres, used for page size, margins, gaps and requested column widths
    Mm,
    "mm"
);
unit!(
    /// Typographic points (1/72 inch), used for font sizes
    Pt,
    "pt"
);
unit!(
    /// CSS pixels (1/96 inch), the unit every resolved layout quantity is expressed in
    Px,
    "px"
);

impl From<Mm> for Px {
    fn from(mm: Mm) -> Px {
        Px(mm.0 * PX_PER_INCH / MM_PER_INCH)
    }
}

impl From<Pt> for Px {
    fn from(pt: Pt) -> Px {
        Px(pt.0 * PX_PER_INCH / PT_PER_INCH)
    }
}

impl From<Px> for Mm {
    fn from(px: Px) -> Mm {
        Mm(px.0 * MM_PER_INCH / PX_PER_INCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_width_in_pixels() {
        let px: Px = Mm(210.0).into();
        assert!((px.0 - 793.7008).abs() < 1e-3);
    }

    #[test]
    fn twelve_points_is_sixteen_pixels() {
        assert_eq!(Px::from(Pt(12.0)), Px(16.0));
    }

    #[test]
    fn pixels_convert_back_to_millimetres() {
        let mm = Mm::from(Px::from(Mm(42.0)));
        assert!((mm.0 - 42.0).abs() < 1e-4);
    }

    #[test]
    fn arithmetic_stays_in_unit() {
        let total: Px = [Px(1.5), Px(2.5), Px(4.0)].into_iter().sum();
        assert_eq!(total, Px(8.0));
        assert_eq!(total * 0.5 - Px(1.0), Px(3.0));
        assert_eq!(total / Px(2.0), 4.0);
        assert_eq!(Px(-3.0).max(Px(1.0)), Px(1.0));
        assert_eq!(format!("{}", Mm(5.0)), "5mm");
    }
}
