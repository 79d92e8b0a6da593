use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    /// An I/O error occurred while reading a font
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("text measurement unavailable for {text:?}: got width {width}")]
    /// The text measurer returned a negative or non-finite width, e.g. because the
    /// requested font is not available
    MeasurementUnavailable { text: String, width: f32 },
}
