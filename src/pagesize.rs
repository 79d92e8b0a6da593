//! The page format text is flowed onto.
//!
//! Sizes are given in portrait orientation (width, height). Pagination always targets
//! ISO A4; the constant is exposed so renderers and exporters agree on the same sheet.
//!
//! # Example
//!
//! ```
//! use column_flow::pagesize::A4;
//! use column_flow::{Mm, Px};
//!
//! let (width, height) = A4;
//! assert_eq!(width, Mm(210.0));
//! assert!(Px::from(height) > Px::from(width));
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in millimetres.
pub type PageSize = (Mm, Mm);

pub const A4: PageSize = (Mm(210.0), Mm(297.0));
