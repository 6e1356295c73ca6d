//! Gallery entries shown in the vault

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A single card in the vault gallery
///
/// Position in the input slice decides helix phase, so callers must keep the
/// order stable between renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Opaque identifier (used as the DOM key)
    pub id: String,
    pub title: String,
    /// Image URL or asset path
    pub image: String,
    pub color: Color,
}

impl GalleryItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image: image.into(),
            color,
        }
    }
}
