//! # Restyle
//!
//! Generate AI image variants from your own photos: upload a main image
//! (and optionally a reference), pick styles and generation options, and
//! request a batch of variants from a remote generative-image service.
//!
//! # Architecture: Normalize, Prepare, Generate
//!
//! The interesting logic is the local **image normalization pipeline**; the
//! remote service is an opaque collaborator behind a trait.
//!
//! ```text
//! 1. Normalize   upload bytes  →  bounded resize      (held in the session)
//! 2. Prepare     held images   →  center crop + prompt (per request)
//! 3. Generate    payloads      →  N concurrent calls, all-or-nothing join
//! ```
//!
//! Both pipeline stages are pure request/response transforms: they consume a
//! held image by reference and produce a fresh [`types::EncodedImage`], so
//! originals stay valid for re-generating at a different aspect ratio
//! without re-uploading.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | [`types::EncodedImage`] — the one entity flowing through every stage |
//! | [`imaging`] | The pipeline: pure dimension math, backend trait, `image`-crate backend |
//! | [`presets`] | Style presets, generation options, aspect ratio and count vocabularies |
//! | [`prompt`] | Final prompt composition (request + identity clause + options + sliders) |
//! | [`session`] | Per-session state, the two-option cap, request validation and preparation |
//! | [`generate`] | Generation client trait, Gemini-style HTTP client, all-or-nothing batch |
//! | [`config`] | `restyle.toml` + `GEMINI_API_KEY` loading and the stock config printer |
//! | [`output`] | Saving variants to disk and CLI summary formatting |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Imaging, All In Memory
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling, pure
//! Rust decoders for JPEG/PNG/WebP) and never touches the filesystem: every
//! operation maps encoded bytes to encoded bytes. Dimension math lives in
//! pure functions so the numeric policies — longer-edge bound, half-up
//! rounding, centered offsets — are unit-tested without decoding a single
//! pixel.
//!
//! ## Crop Never Resamples
//!
//! The aspect-ratio crop extracts pixels verbatim from a centered window.
//! Resampling happens exactly once, at upload normalization; re-generating
//! at a different ratio re-crops the held original instead of degrading an
//! already-resampled copy.
//!
//! ## All-Or-Nothing Batches
//!
//! A request for N variants fires N independent generation calls
//! concurrently and joins them with [`futures::future::try_join_all`]. If
//! any sibling fails, the user sees a single failure and zero partial
//! results — there is no half-finished gallery state to reason about.
//!
//! ## Errors Are Terminal, Sessions Are Not
//!
//! Decode, validation, and generation errors surface immediately and abort
//! the in-progress action; nothing is retried and nothing is persisted, so
//! the session always returns to an idle, re-triggerable state.

pub mod config;
pub mod generate;
pub mod imaging;
pub mod output;
pub mod presets;
pub mod prompt;
pub mod session;
pub mod types;
