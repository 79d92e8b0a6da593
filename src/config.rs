use crate::layout::{ColumnMode, Margins};
use crate::units::{Mm, Pt};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const COLUMN_RANGE: RangeInclusive<usize> = 1..=12;
pub const FONT_SIZE_RANGE: RangeInclusive<f32> = 6.0..=96.0;
pub const LINE_SPACING_RANGE: RangeInclusive<f32> = 1.0..=4.0;
pub const MAX_MARGIN: Mm = Mm(40.0);
pub const MIN_CUSTOM_WIDTH: Mm = Mm(0.5);

/// Everything needed to lay out a body of text onto A4 pages.
///
/// Deserializing fills any missing field from [LayoutConfig::default], so a partial
/// document such as `{"text": "...", "columns": 3}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub text: String,
    pub columns: usize,
    pub font_family: String,
    pub font_size: Pt,
    /// Line height as a multiple of the font size
    pub line_spacing: f32,
    pub margins: Margins<Mm>,
    /// Space between adjacent columns
    pub gap: Mm,
    pub column_mode: ColumnMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            text: String::new(),
            columns: 2,
            font_family: "serif".to_string(),
            font_size: Pt(12.0),
            line_spacing: 1.4,
            margins: Margins::all(Mm(15.0)),
            gap: Mm(6.0),
            column_mode: ColumnMode::Equal,
        }
    }
}

impl LayoutConfig {
    pub fn new<S: Into<String>>(text: S) -> LayoutConfig {
        LayoutConfig {
            text: text.into(),
            ..LayoutConfig::default()
        }
    }

    pub fn with_columns(mut self, columns: usize) -> LayoutConfig {
        self.columns = columns;
        self
    }

    pub fn with_font<S: Into<String>>(mut self, family: S, size: Pt) -> LayoutConfig {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f32) -> LayoutConfig {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_margins(mut self, margins: Margins<Mm>) -> LayoutConfig {
        self.margins = margins;
        self
    }

    pub fn with_gap(mut self, gap: Mm) -> LayoutConfig {
        self.gap = gap;
        self
    }

    pub fn with_column_mode(mut self, column_mode: ColumnMode) -> LayoutConfig {
        self.column_mode = column_mode;
        self
    }

    /// A copy with every numeric setting pulled into its supported range. Non-finite values
    /// are replaced by the defaults.
    pub fn sanitized(&self) -> LayoutConfig {
        let defaults = LayoutConfig::default();

        let column_mode = match &self.column_mode {
            ColumnMode::Equal => ColumnMode::Equal,
            ColumnMode::Custom(widths) => ColumnMode::Custom(
                widths
                    .iter()
                    .map(|width| {
                        if width.is_finite() {
                            width.max(MIN_CUSTOM_WIDTH)
                        } else {
                            MIN_CUSTOM_WIDTH
                        }
                    })
                    .collect(),
            ),
        };

        LayoutConfig {
            text: self.text.clone(),
            columns: self
                .columns
                .clamp(*COLUMN_RANGE.start(), *COLUMN_RANGE.end()),
            font_family: self.font_family.clone(),
            font_size: Pt(clamp_or(
                self.font_size.0,
                &FONT_SIZE_RANGE,
                defaults.font_size.0,
            )),
            line_spacing: clamp_or(
                self.line_spacing,
                &LINE_SPACING_RANGE,
                defaults.line_spacing,
            ),
            margins: self.margins.clamped(MAX_MARGIN),
            gap: if self.gap.is_finite() {
                self.gap.max(Mm(0.0))
            } else {
                defaults.gap
            },
            column_mode,
        }
    }
}

fn clamp_or(value: f32, range: &RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}
