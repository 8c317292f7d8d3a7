//! Final prompt composition for the generation collaborator.
//!
//! The remote service receives one flat text prompt built from the user's
//! request, a fixed identity-preservation instruction, the selected option
//! labels, the creativity value, and the seed. Whatever shape the inputs
//! arrive in (multi-line request text, empty option lists), the output is a
//! single line with runs of whitespace collapsed.

/// Everything that feeds the composed prompt.
#[derive(Debug, Clone)]
pub struct PromptSpec<'a> {
    /// The user's free-text request (possibly multi-line).
    pub request: &'a str,
    /// Labels of the enabled generation options, in catalog order.
    pub option_labels: Vec<&'a str>,
    /// Creativity slider value, 0–100.
    pub creativity: u8,
    /// Seed forwarded verbatim for cross-variant consistency.
    pub seed: u32,
}

/// Compose the final single-line prompt.
pub fn compose(spec: &PromptSpec<'_>) -> String {
    let options = spec.option_labels.join(", ");
    let text = format!(
        "Perform the following request: \"{}\". \
         The main subject's face and identity, from the input image(s), must be preserved. \
         Incorporate these transformations if applicable: {}. \
         Creativity level should be around {} out of 100. \
         Use this number as a generation seed for consistency: {}.",
        spec.request, options, spec.creativity, spec.seed
    );

    // Collapse internal runs of whitespace (the request may contain newlines)
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
