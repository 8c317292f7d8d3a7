//! Shared types flowing through the pipeline.
//!
//! [`EncodedImage`] is the single entity every stage consumes and produces:
//! encoded bytes plus the mime type and pixel dimensions describing them.
//! At JSON boundaries (the generation API, saved manifests) the byte payload
//! is represented as base64 text.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// Image encodings accepted at the upload boundary and produced by the
/// pipeline. Everything else is rejected at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/webp")]
    WebP,
}

impl ImageMime {
    /// Parse a mime type string (`"image/jpeg"` etc.).
    pub fn from_mime_type(s: &str) -> Option<Self> {
        match s {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Map a file extension to a mime type (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }

    /// Preferred file extension when saving to disk.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }
}

/// An encoded image together with the metadata describing its payload.
///
/// `width`/`height` always describe the *current* content of `data`. Every
/// transform recomputes them from the decoded pixels — they are never copied
/// stale from an input value. Transforms take `&EncodedImage` and return a
/// fresh value, so an original stays valid for repeated cropping at
/// different ratios without re-uploading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    /// Encoded bytes; base64 text in serialized form.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    #[serde(rename = "mimeType")]
    pub mime: ImageMime,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    /// The payload as base64 text, as the generation API expects it.
    pub fn base64_data(&self) -> String {
        BASE64.encode(&self.data)
    }

    /// `data:` URL form for embedding in HTML previews.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime.as_str(), self.base64_data())
    }
}

/// Serde adapter: `Vec<u8>` as standard base64 text.
mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        BASE64.decode(text.as_bytes()).map_err(D::Error::custom)
    }
}
