//! The image-analysis capability the engine consumes.
//!
//! Providers are handed to callers explicitly; credentials and clients are
//! constructed at the application boundary, never picked up here.

use crate::error::ProviderError;
use crate::models::PropAnalysis;

/// Raw image bytes plus their MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        ImageInput {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// MIME type for a lowercased file extension; unknown types are sent as PNG.
pub fn mime_for_extension(ext: Option<&str>) -> &'static str {
    match ext {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}

/// Turns a drawing into a structured [`PropAnalysis`].
pub trait AnalysisProvider {
    fn analyze(&self, image: &ImageInput) -> Result<PropAnalysis, ProviderError>;
}

impl<P: AnalysisProvider + ?Sized> AnalysisProvider for &P {
    fn analyze(&self, image: &ImageInput) -> Result<PropAnalysis, ProviderError> {
        (**self).analyze(image)
    }
}

/// Returns the same analysis for every image. Useful offline and in tests.
#[derive(Clone, Debug, Default)]
pub struct StaticProvider {
    analysis: PropAnalysis,
}

impl StaticProvider {
    pub fn new(analysis: PropAnalysis) -> Self {
        StaticProvider { analysis }
    }

    pub fn from_json(txt: &str) -> Result<Self, ProviderError> {
        Ok(StaticProvider::new(PropAnalysis::from_json(txt)?))
    }
}

impl AnalysisProvider for StaticProvider {
    fn analyze(&self, _image: &ImageInput) -> Result<PropAnalysis, ProviderError> {
        Ok(self.analysis.clone())
    }
}
