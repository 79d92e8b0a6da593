use crate::layout::margins::Margins;
use crate::pagesize::A4;
use crate::rect::Rect;
use crate::units::{Mm, Pt, Px};
use serde::{Deserialize, Serialize};

/// Smallest content width handed to the column resolver, so extreme margins never
/// produce zero or negative column widths
pub const MIN_CONTENT_WIDTH: Px = Px(1.0);

/// Smallest usable column height
pub const MIN_COLUMN_HEIGHT: Px = Px(16.0);

/// How the usable width of the page is divided between columns
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMode {
    /// Every column gets the same share of the usable width
    #[default]
    Equal,
    /// Requested column widths. Only their ratios matter: the widths are rescaled so the
    /// columns exactly fill the usable width.
    Custom(Vec<Mm>),
}

/// Pixel-space geometry of a page and its columns, resolved once per layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub page_width: Px,
    pub page_height: Px,
    pub margins: Margins<Px>,
    /// Width of each column, left to right
    pub column_widths: Vec<Px>,
    /// Horizontal offset of each column from the left margin
    pub column_offsets: Vec<Px>,
    pub column_height: Px,
    pub gap: Px,
    pub font_size: Px,
    pub line_height: Px,
    /// Factor applied to custom column widths; 1.0 for equal columns
    pub custom_scale: f32,
}

impl LayoutMetrics {
    /// Resolve the geometry of an A4 page split into `column_count` columns.
    ///
    /// Out-of-range inputs are clamped rather than rejected: negative gaps become 0, the content
    /// width never drops below [MIN_CONTENT_WIDTH] and the column height never drops below
    /// [MIN_COLUMN_HEIGHT].
    pub fn resolve(
        column_count: usize,
        mode: &ColumnMode,
        gap: Mm,
        margins: &Margins<Mm>,
        font_size: Pt,
        line_spacing: f32,
    ) -> LayoutMetrics {
        let column_count = column_count.max(1);
        let page_width = Px::from(A4.0);
        let page_height = Px::from(A4.1);
        let margins = margins.to_px();
        let gap = Px::from(gap).max(Px(0.0));

        let content_width = (page_width - margins.horizontal()).max(MIN_CONTENT_WIDTH);
        let total_gap = gap * (column_count - 1) as f32;
        let available = (content_width - total_gap).max(MIN_CONTENT_WIDTH);

        let (column_widths, custom_scale) = match mode {
            ColumnMode::Equal => (equal_widths(available, column_count), 1.0),
            ColumnMode::Custom(requested) => custom_widths(available, column_count, requested),
        };

        let mut column_offsets = Vec::with_capacity(column_count);
        let mut offset = Px(0.0);
        for width in column_widths.iter() {
            column_offsets.push(offset);
            offset += *width + gap;
        }

        let column_height = (page_height - margins.vertical()).max(MIN_COLUMN_HEIGHT);
        let font_size = Px::from(font_size);
        let line_height = font_size * line_spacing;

        log::debug!(
            "resolved {column_count} columns of {column_widths:?} (scale {custom_scale}), column height {column_height}, line height {line_height}"
        );

        LayoutMetrics {
            page_width,
            page_height,
            margins,
            column_widths,
            column_offsets,
            column_height,
            gap,
            font_size,
            line_height,
            custom_scale,
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// The area of the page inside the margins
    pub fn content_box(&self) -> Rect {
        Rect {
            x1: self.margins.left,
            y1: self.margins.top,
            x2: self.page_width - self.margins.right,
            y2: self.page_height - self.margins.bottom,
        }
    }

    /// Where column `index` sits on the page, or `None` past the last column
    pub fn column_rect(&self, index: usize) -> Option<Rect> {
        let width = *self.column_widths.get(index)?;
        let offset = *self.column_offsets.get(index)?;
        Some(Rect::from_origin(
            self.margins.left + offset,
            self.margins.top,
            width,
            self.column_height,
        ))
    }

    /// Vertical offset of the `line`-th line from the top of its column
    pub fn line_top(&self, line: usize) -> Px {
        self.line_height * line as f32
    }
}

fn equal_widths(available: Px, column_count: usize) -> Vec<Px> {
    vec![available / column_count as f32; column_count]
}

/// Rescale the first `column_count` requested widths so they sum to `available`. The last
/// column takes whatever remains after the others so the sum is exact.
fn custom_widths(available: Px, column_count: usize, requested: &[Mm]) -> (Vec<Px>, f32) {
    let requested: Vec<Mm> = (0..column_count)
        .map(|i| {
            requested
                .get(i)
                .copied()
                .filter(|width| width.is_finite())
                .unwrap_or_default()
                .max(Mm(0.0))
        })
        .collect();
    let total: Mm = requested.iter().copied().sum();
    if total <= Mm(0.0) {
        return (equal_widths(available, column_count), 1.0);
    }

    let scale = Mm::from(available) / total;
    let mut widths: Vec<Px> = requested
        .iter()
        .map(|width| Px::from(*width * scale))
        .collect();
    let others: Px = widths.iter().take(column_count - 1).copied().sum();
    if let Some(last) = widths.last_mut() {
        *last = (available - others).max(Px(0.0));
    }
    (widths, scale)
}
