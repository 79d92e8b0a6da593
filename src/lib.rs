mod config;
pub use config::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

/// Tokenizing, line breaking and column/page flow of text
pub mod layout;

mod measure;
pub use measure::*;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

mod units;
pub use units::*;
