use crate::{measure::TextMeasure, LayoutError, Px};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use std::path::Path;

/// A parsed font, used to measure text with its real glyph advances. Fonts can be TTF or OTF
/// fonts.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LayoutError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Read and parse a font file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Font, LayoutError> {
        let bytes = std::fs::read(path)?;
        Font::load(bytes)
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    /// Glyph used to draw `ch`, falling back to the replacement character and then `?`
    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        let face = self.face.as_face_ref();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
    }

    /// Calculate the width of a given string of text at the given font size. Characters
    /// without any usable glyph take no space.
    pub fn width_of_text(&self, text: &str, size: Px) -> Px {
        let face = self.face.as_face_ref();
        let scaling = size / face.units_per_em() as f32;
        text.chars()
            .filter_map(|ch| self.glyph_id(ch))
            .map(|gid| scaling * face.glyph_hor_advance(gid).unwrap_or_default() as f32)
            .sum()
    }
}

impl TextMeasure for Font {
    fn measure(&self, text: &str, _font_family: &str, font_size: Px) -> Px {
        self.width_of_text(text, font_size)
    }
}

/// A collection of fonts looked up by family name
#[derive(Default)]
pub struct FontBook {
    fonts: Vec<(Option<String>, Font)>,
}

impl FontBook {
    pub fn new() -> FontBook {
        FontBook::default()
    }

    /// Add a font, indexed under its family name
    pub fn add_font(&mut self, font: Font) {
        let family = font.family();
        if family.is_none() {
            log::warn!("font without a family name can only be used as a fallback");
        }
        self.fonts.push((family, font));
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The font registered for `family` (case-insensitive), or the first font added
    pub fn font(&self, family: &str) -> Option<&Font> {
        self.fonts
            .iter()
            .find(|(name, _)| {
                name.as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(family))
            })
            .or_else(|| self.fonts.first())
            .map(|(_, font)| font)
    }
}

impl TextMeasure for FontBook {
    /// An empty book has nothing to measure with and reports a non-finite width
    fn measure(&self, text: &str, font_family: &str, font_size: Px) -> Px {
        match self.font(font_family) {
            Some(font) => font.width_of_text(text, font_size),
            None => Px(f32::NAN),
        }
    }
}
