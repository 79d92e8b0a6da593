use crate::{
    config::LayoutConfig,
    layout::{assemble, flow, tokenize, LayoutMetrics},
    measure::TextMeasure,
    page::Page,
    LayoutError,
};
use serde::{Deserialize, Serialize};

/// A fully laid out body of text: the geometry it was laid out with and the resulting
/// pages. Documents are recomputed from scratch for every configuration; nothing carries
/// over between layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub metrics: LayoutMetrics,
    pub pages: Vec<Page>,
}

impl Document {
    /// Lay out `config.text` using `measurer` for text widths.
    ///
    /// The configuration is [sanitized](LayoutConfig::sanitized) first, so out-of-range
    /// settings are clamped rather than rejected. The only failure is a measurer that cannot
    /// produce a usable width.
    pub fn layout<M: TextMeasure + ?Sized>(
        config: &LayoutConfig,
        measurer: &M,
    ) -> Result<Document, LayoutError> {
        let config = config.sanitized();
        let metrics = LayoutMetrics::resolve(
            config.columns,
            &config.column_mode,
            config.gap,
            &config.margins,
            config.font_size,
            config.line_spacing,
        );

        let tokens = tokenize(&config.text);
        let pages = flow(
            &tokens,
            &metrics,
            config.columns,
            &config.font_family,
            measurer,
        )?;
        let pages = assemble(pages, config.columns);
        log::debug!(
            "laid out {} tokens onto {} page(s) of {} column(s)",
            tokens.len(),
            pages.len(),
            config.columns
        );

        Ok(Document { metrics, pages })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn column_count(&self) -> usize {
        self.metrics.column_count()
    }
}
