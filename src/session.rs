//! In-memory session state and generation-request preparation.
//!
//! One [`Session`] holds everything a user has set up for the current
//! interactive run: image slots, free-text prompt, sliders, and option
//! toggles. Nothing is persisted — state lives for the session and every
//! error leaves it idle and re-triggerable.
//!
//! The session is also where presentation policy lives: the two-option cap
//! is enforced here, at the UI boundary, never inside the image pipeline.

use crate::imaging::{AspectRatio, BackendError, ImageBackend, crop_to_ratio};
use crate::presets::{GENERATION_OPTIONS, StylePreset};
use crate::prompt::{self, PromptSpec};
use crate::types::EncodedImage;
use rand::Rng;
use std::collections::BTreeSet;
use thiserror::Error;

/// At most this many generation options may be enabled at once.
pub const MAX_ACTIVE_OPTIONS: usize = 2;

/// Default bound for the longer edge of normalized uploads.
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;

/// Seeds are drawn from the positive `i32` range the service expects.
const SEED_RANGE: std::ops::Range<u32> = 0..2_147_483_647;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("a main image is required before generating")]
    MissingMainImage,
    #[error("a prompt or style selection is required before generating")]
    EmptyPrompt,
    #[error(transparent)]
    Imaging(#[from] BackendError),
}

/// A fully prepared generation request: cropped payloads, composed prompt,
/// and the requested variant count. Handed as-is to the generation client.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Main image first, reference second when present.
    pub images: Vec<EncodedImage>,
    pub prompt: String,
    pub count: u32,
}

/// Mutable per-session state.
#[derive(Debug, Clone)]
pub struct Session {
    main: Option<EncodedImage>,
    reference: Option<EncodedImage>,
    prompt: String,
    creativity: u8,
    seed: u32,
    aspect_ratio: AspectRatio,
    count: u32,
    enabled_options: BTreeSet<&'static str>,
    results: Vec<EncodedImage>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session with the stock defaults: 9:16 ratio, creativity 50,
    /// one variant, `multi-pose` enabled, and a random seed.
    pub fn new() -> Self {
        let mut enabled_options = BTreeSet::new();
        enabled_options.insert("multi-pose");

        Self {
            main: None,
            reference: None,
            prompt: String::new(),
            creativity: 50,
            seed: rand::rng().random_range(SEED_RANGE),
            aspect_ratio: AspectRatio::parse("9:16").expect("stock ratio is valid"),
            count: 1,
            enabled_options,
            results: Vec::new(),
        }
    }

    /// Put a normalized image in the main slot. Clears stale results.
    pub fn set_main_image(&mut self, image: EncodedImage) {
        self.main = Some(image);
        self.results.clear();
    }

    /// Put a normalized image in the reference slot. Clears stale results.
    pub fn set_reference_image(&mut self, image: EncodedImage) {
        self.reference = Some(image);
        self.results.clear();
    }

    pub fn main_image(&self) -> Option<&EncodedImage> {
        self.main.as_ref()
    }

    pub fn reference_image(&self) -> Option<&EncodedImage> {
        self.reference.as_ref()
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Append a style preset's prompt fragment to the free text.
    pub fn append_style(&mut self, preset: &StylePreset) {
        self.prompt = format!("{} {}", self.prompt, preset.prompt)
            .trim()
            .to_string();
    }

    /// Creativity slider; clamped to 0–100.
    pub fn set_creativity(&mut self, value: u8) {
        self.creativity = value.min(100);
    }

    pub fn creativity(&self) -> u8 {
        self.creativity
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.aspect_ratio = ratio;
    }

    pub fn aspect_ratio(&self) -> &AspectRatio {
        &self.aspect_ratio
    }

    /// Requested variant count; clamped to the offered 1–4 range.
    pub fn set_count(&mut self, count: u32) {
        self.count = count.clamp(1, 4);
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Toggle a generation option. Returns whether the change was applied:
    /// enabling a third option is refused, disabling always succeeds.
    /// Unknown ids are refused.
    pub fn set_option(&mut self, id: &str, enabled: bool) -> bool {
        let Some(option) = GENERATION_OPTIONS.iter().find(|o| o.id == id) else {
            return false;
        };

        if enabled {
            if self.enabled_options.len() >= MAX_ACTIVE_OPTIONS
                && !self.enabled_options.contains(option.id)
            {
                return false;
            }
            self.enabled_options.insert(option.id);
        } else {
            self.enabled_options.remove(option.id);
        }
        true
    }

    pub fn option_enabled(&self, id: &str) -> bool {
        self.enabled_options.contains(id)
    }

    /// Labels of the enabled options, in catalog order.
    pub fn selected_option_labels(&self) -> Vec<&'static str> {
        GENERATION_OPTIONS
            .iter()
            .filter(|o| self.enabled_options.contains(o.id))
            .map(|o| o.label)
            .collect()
    }

    pub fn set_results(&mut self, results: Vec<EncodedImage>) {
        self.results = results;
    }

    pub fn results(&self) -> &[EncodedImage] {
        &self.results
    }

    /// Validate the session and prepare the payloads for one generation run.
    ///
    /// Crops the main image (and the reference, when present) to the
    /// selected aspect ratio and composes the final prompt. The held
    /// originals are untouched, so re-generating at a different ratio needs
    /// no re-upload. Fails fast on a missing main image or an empty prompt.
    pub fn prepare_request(
        &self,
        backend: &impl ImageBackend,
    ) -> Result<GenerationRequest, SessionError> {
        let main = self.main.as_ref().ok_or(SessionError::MissingMainImage)?;
        if self.prompt.trim().is_empty() {
            return Err(SessionError::EmptyPrompt);
        }

        let mut images = vec![crop_to_ratio(backend, main, &self.aspect_ratio)?];
        if let Some(reference) = &self.reference {
            images.push(crop_to_ratio(backend, reference, &self.aspect_ratio)?);
        }

        let prompt = prompt::compose(&PromptSpec {
            request: &self.prompt,
            option_labels: self.selected_option_labels(),
            creativity: self.creativity,
            seed: self.seed,
        });

        Ok(GenerationRequest {
            images,
            prompt,
            count: self.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::MockBackend;
    use crate::presets::style_preset;
    use crate::types::ImageMime;

    fn held(width: u32, height: u32) -> EncodedImage {
        EncodedImage {
            data: vec![1, 2, 3, 4],
            mime: ImageMime::Jpeg,
            width,
            height,
        }
    }

    #[test]
    fn defaults_match_stock_settings() {
        let session = Session::new();
        assert_eq!(session.creativity(), 50);
        assert_eq!(session.count(), 1);
        assert_eq!(session.aspect_ratio().label(), "9:16");
        assert!(session.option_enabled("multi-pose"));
        assert!(SEED_RANGE.contains(&session.seed()));
    }

    #[test]
    fn option_cap_refuses_a_third_toggle() {
        let mut session = Session::new();
        assert!(session.set_option("high-detail", true));
        // multi-pose + high-detail are on; a third is refused
        assert!(!session.set_option("cinematic-look", true));
        assert!(!session.option_enabled("cinematic-look"));

        // Re-enabling an already-on option and disabling always work
        assert!(session.set_option("high-detail", true));
        assert!(session.set_option("multi-pose", false));
        assert!(session.set_option("cinematic-look", true));
    }

    #[test]
    fn unknown_option_is_refused() {
        let mut session = Session::new();
        assert!(!session.set_option("time-travel", true));
    }

    #[test]
    fn selected_labels_follow_catalog_order() {
        let mut session = Session::new();
        session.set_option("multi-pose", false);
        session.set_option("artistic-style", true);
        session.set_option("high-detail", true);

        assert_eq!(
            session.selected_option_labels(),
            vec!["enhanced detail and sharpness", "distinctive artistic styling"]
        );
    }

    #[test]
    fn append_style_extends_prompt() {
        let mut session = Session::new();
        session.append_style(style_preset("neon").unwrap());
        assert_eq!(session.prompt(), "neon punk, glowing lights, dark background");

        session.set_prompt("portrait of a cat");
        session.append_style(style_preset("sketch").unwrap());
        assert_eq!(
            session.prompt(),
            "portrait of a cat pencil sketch, black and white, hand-drawn"
        );
    }

    #[test]
    fn upload_clears_previous_results() {
        let mut session = Session::new();
        session.set_results(vec![held(8, 8)]);
        session.set_main_image(held(100, 100));
        assert!(session.results().is_empty());

        session.set_results(vec![held(8, 8)]);
        session.set_reference_image(held(100, 100));
        assert!(session.results().is_empty());
    }

    #[test]
    fn prepare_requires_main_image() {
        let session = Session::new();
        let backend = MockBackend::new();
        assert!(matches!(
            session.prepare_request(&backend),
            Err(SessionError::MissingMainImage)
        ));
    }

    #[test]
    fn prepare_requires_nonempty_prompt() {
        let mut session = Session::new();
        session.set_main_image(held(100, 100));
        session.set_prompt("   \n ");
        let backend = MockBackend::new();
        assert!(matches!(
            session.prepare_request(&backend),
            Err(SessionError::EmptyPrompt)
        ));
    }

    #[test]
    fn prepare_crops_main_and_reference() {
        let mut session = Session::new();
        session.set_main_image(held(1024, 512));
        session.set_reference_image(held(500, 800));
        session.set_prompt("swap the background");
        session.set_aspect_ratio(AspectRatio::parse("1:1").unwrap());
        session.set_count(3);
        session.set_seed(77);

        // Identify results pop from the back: main first, then reference
        let backend = MockBackend::with_dimensions(vec![
            Dimensions {
                width: 500,
                height: 800,
            },
            Dimensions {
                width: 1024,
                height: 512,
            },
        ]);

        let request = session.prepare_request(&backend).unwrap();
        assert_eq!(request.count, 3);
        assert_eq!(request.images.len(), 2);
        assert_eq!(
            (request.images[0].width, request.images[0].height),
            (512, 512)
        );
        assert_eq!(
            (request.images[1].width, request.images[1].height),
            (500, 500)
        );
        assert!(request.prompt.contains("\"swap the background\""));
        assert!(request.prompt.contains("seed for consistency: 77."));
    }

    #[test]
    fn pipeline_failure_propagates_and_leaves_session_idle() {
        let mut session = Session::new();
        session.set_main_image(held(100, 100));
        session.set_prompt("x");

        let backend = MockBackend::new(); // identify queue empty → decode error
        assert!(matches!(
            session.prepare_request(&backend),
            Err(SessionError::Imaging(_))
        ));

        // Session state is untouched and re-triggerable
        assert!(session.main_image().is_some());
        assert_eq!(session.prompt(), "x");
    }
}
