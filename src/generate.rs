//! The remote generation collaborator.
//!
//! [`GenerationClient`] is the seam: one call sends the prepared payloads
//! plus the composed prompt and yields a single result image. The batch
//! layer fires `count` independent calls concurrently and joins them
//! all-or-nothing — any failure fails the whole batch and no partial
//! results survive.
//!
//! [`GeminiClient`] is the production implementation, targeting a
//! `models/{model}:generateContent` endpoint: inline-data image parts plus a
//! text part in, inline image data out. Results are assumed JPEG unless the
//! response says otherwise, and their dimensions are recomputed by decoding
//! so the data-model invariant holds for generated images too.

use crate::config::ServiceConfig;
use crate::imaging::{BackendError, ImageBackend, RustBackend};
use crate::session::GenerationRequest;
use crate::types::{EncodedImage, ImageMime};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation service rejected the request: {0}")]
    Api(String),
    #[error("no image data found in the generation response")]
    NoImageData,
    #[error("generated image is not decodable: {0}")]
    Result(#[from] BackendError),
}

/// One generation call: prepared payloads + prompt in, one image out.
#[async_trait]
pub trait GenerationClient: Sync {
    async fn generate_one(
        &self,
        images: &[EncodedImage],
        prompt: &str,
    ) -> Result<EncodedImage, GenerateError>;
}

/// Run a whole generation request: `count` concurrent calls, joined
/// all-or-nothing. On any failure the error propagates and no partial
/// results are returned.
pub async fn generate_batch(
    client: &impl GenerationClient,
    request: &GenerationRequest,
) -> Result<Vec<EncodedImage>, GenerateError> {
    log::info!(
        "generating {} variant(s) from {} payload image(s)",
        request.count,
        request.images.len()
    );

    let calls = (0..request.count).map(|_| client.generate_one(&request.images, &request.prompt));
    let results = futures::future::try_join_all(calls).await?;

    if results.is_empty() {
        return Err(GenerateError::NoImageData);
    }
    Ok(results)
}

// Response shape for the parts we read. Everything else in the payload is
// ignored.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
    data: String,
}

/// Pull the first inline image out of a response body.
fn extract_inline_image(body: &Value) -> Result<(Vec<u8>, ImageMime), GenerateError> {
    let response: GenerateContentResponse =
        serde_json::from_value(body.clone()).map_err(|e| GenerateError::Api(e.to_string()))?;

    let inline = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .find_map(|p| p.inline_data)
        .ok_or(GenerateError::NoImageData)?;

    let data = BASE64
        .decode(inline.data.as_bytes())
        .map_err(|e| GenerateError::Api(format!("inline data is not base64: {e}")))?;

    // Results are assumed JPEG when the service omits or surprises us on
    // the mime type
    let mime = inline
        .mime_type
        .as_deref()
        .and_then(ImageMime::from_mime_type)
        .unwrap_or(ImageMime::Jpeg);

    Ok((data, mime))
}

/// HTTP client for a Gemini-style `generateContent` image endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
    backend: RustBackend,
}

impl GeminiClient {
    pub fn new(config: &ServiceConfig, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            backend: RustBackend::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    fn build_body(images: &[EncodedImage], prompt: &str) -> Value {
        let mut parts: Vec<Value> = images
            .iter()
            .map(|image| {
                json!({
                    "inlineData": {
                        "mimeType": image.mime.as_str(),
                        "data": image.base64_data(),
                    }
                })
            })
            .collect();
        parts.push(json!({ "text": prompt }));

        json!({
            "contents": { "parts": parts },
            "generationConfig": {
                "responseModalities": ["IMAGE"],
            },
        })
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate_one(
        &self,
        images: &[EncodedImage],
        prompt: &str,
    ) -> Result<EncodedImage, GenerateError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_body(images, prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            log::warn!("generation call failed with {status}");
            return Err(GenerateError::Api(format!("{status}: {detail}")));
        }

        let body: Value = response.json().await?;
        let (data, mime) = extract_inline_image(&body)?;

        // Recompute dimensions from the actual payload
        let dims = self.backend.identify(&data)?;
        Ok(EncodedImage {
            data,
            mime,
            width: dims.width,
            height: dims.height,
        })
    }
}
