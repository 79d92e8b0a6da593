use crate::units::Px;
use std::cell::RefCell;
use std::collections::HashMap;

/// Measures the rendered width of text, in the same pixel space the column widths are
/// resolved in.
///
/// Implementations must be deterministic for a given font and size during a layout pass, and
/// monotonic: a prefix of a string never measures wider than the whole string.
pub trait TextMeasure {
    /// Width of `text` set in `font_family` at `font_size`
    fn measure(&self, text: &str, font_family: &str, font_size: Px) -> Px;
}

/// Treats every character as the same width, a fixed fraction of the font size. Useful for
/// monospaced fonts and for tests, where widths must be predictable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    /// Advance of one character, in ems
    pub em: f32,
}

impl FixedAdvance {
    pub fn new(em: f32) -> FixedAdvance {
        FixedAdvance { em }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        FixedAdvance { em: 0.6 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str, _font_family: &str, font_size: Px) -> Px {
        font_size * (self.em * text.chars().count() as f32)
    }
}

type CacheKey = (String, u32, String);

/// Memoizes another measurer for the duration of a layout pass.
///
/// The flow engine measures the same words and spaces over and over; wrapping a slow measurer
/// (e.g. one backed by a shaping engine) in a cache keeps repeated lookups cheap. The cache is
/// not shared between threads; build one per pass.
pub struct CachedMeasure<M> {
    inner: M,
    cache: RefCell<HashMap<CacheKey, Px>>,
}

impl<M: TextMeasure> CachedMeasure<M> {
    pub fn new(inner: M) -> CachedMeasure<M> {
        CachedMeasure {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct measurements held
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: TextMeasure> TextMeasure for CachedMeasure<M> {
    fn measure(&self, text: &str, font_family: &str, font_size: Px) -> Px {
        let key = (
            font_family.to_string(),
            font_size.0.to_bits(),
            text.to_string(),
        );
        if let Some(width) = self.cache.borrow().get(&key) {
            return *width;
        }
        let width = self.inner.measure(text, font_family, font_size);
        self.cache.borrow_mut().insert(key, width);
        width
    }
}
