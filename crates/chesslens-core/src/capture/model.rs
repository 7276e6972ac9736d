//! Capture domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An image file submitted for prediction and, optionally, saved with its board.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name, forwarded to the server
    pub file_name: String,
    /// MIME type, e.g. `image/png`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Whether the declared content type is an image type.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The prediction service's answer for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted FEN text
    pub fen: String,
    /// Link to view the position in the external analysis tool
    pub external_analysis_url: String,
}
