//! Text flow and pagination.
//!
//! Laying out text is a straight pipeline, each stage a pure function of its inputs:
//!
//! - [`LayoutMetrics::resolve`](crate::layout::LayoutMetrics::resolve) turns page, margin, gap,
//!   column and font settings into pixel geometry
//! - [`tokenize`](crate::layout::tokenize) splits text into newlines, spaces and words
//! - [`flow`](crate::layout::flow) wraps tokens into lines and stacks lines into columns and
//!   pages
//! - [`assemble`](crate::layout::assemble) pads the last page and guarantees at least one page
//!
//! [`Document::layout`](crate::Document::layout) runs the whole pipeline.
//!
//! # Example
//!
//! ```
//! use column_flow::layout::{assemble, flow, tokenize, ColumnMode, LayoutMetrics, Margins};
//! use column_flow::{FixedAdvance, Mm, Pt};
//!
//! let metrics = LayoutMetrics::resolve(
//!     2,
//!     &ColumnMode::Equal,
//!     Mm(6.0),
//!     &Margins::all(Mm(15.0)),
//!     Pt(12.0),
//!     1.4,
//! );
//! let tokens = tokenize("Hello, world!\n\nSecond paragraph.");
//! let pages = flow(&tokens, &metrics, 2, "monospace", &FixedAdvance::default())
//!     .expect("fixed advances are always measurable");
//! let pages = assemble(pages, 2);
//!
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].columns[0].lines.len(), 3);
//! ```

mod assemble;
mod flow;
mod margins;
mod metrics;
mod tokenize;

pub use assemble::*;
pub use flow::*;
pub use margins::*;
pub use metrics::*;
pub use tokenize::*;
