//! Fixed option vocabularies: style presets, generation options, aspect
//! ratios, and variant counts.
//!
//! These mirror what the selection UI offers. They are presentation
//! vocabulary, not pipeline limits — the cropper accepts any valid `"W:H"`
//! string, and the two-option cap is enforced at the session boundary.

/// A one-click style whose prompt fragment is appended to the user's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePreset {
    pub name: &'static str,
    pub prompt: &'static str,
}

pub const STYLE_PRESETS: &[StylePreset] = &[
    StylePreset {
        name: "cinematic",
        prompt: "cinematic lighting, epic, dramatic",
    },
    StylePreset {
        name: "anime",
        prompt: "anime style, vibrant, detailed",
    },
    StylePreset {
        name: "neon",
        prompt: "neon punk, glowing lights, dark background",
    },
    StylePreset {
        name: "3d-render",
        prompt: "3D render, octane render, high detail",
    },
    StylePreset {
        name: "watercolor",
        prompt: "watercolor painting, soft, blended",
    },
    StylePreset {
        name: "sketch",
        prompt: "pencil sketch, black and white, hand-drawn",
    },
];

/// A toggleable generation behavior; its label feeds the composed prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const GENERATION_OPTIONS: &[GenerationOption] = &[
    GenerationOption {
        id: "multi-pose",
        label: "varied poses and angles",
        description: "Generate variants with different poses and camera angles.",
    },
    GenerationOption {
        id: "high-detail",
        label: "enhanced detail and sharpness",
        description: "Increase fine detail and overall sharpness.",
    },
    GenerationOption {
        id: "cinematic-look",
        label: "cinematic lighting and color",
        description: "Add film-like lighting and color grading.",
    },
    GenerationOption {
        id: "artistic-style",
        label: "distinctive artistic styling",
        description: "Push the result toward a more artistic interpretation.",
    },
];

/// Aspect ratios offered by the selector. The cropper itself accepts any
/// syntactically valid ratio, not just these.
pub const ASPECT_RATIOS: &[&str] = &["9:16", "1:1", "16:9", "4:5", "3:4"];

/// Variant counts offered per generation request.
pub const VARIANT_COUNTS: &[u32] = &[1, 2, 3, 4];

/// Look up a style preset by name.
pub fn style_preset(name: &str) -> Option<&'static StylePreset> {
    STYLE_PRESETS.iter().find(|p| p.name == name)
}

/// Look up a generation option by id.
pub fn generation_option(id: &str) -> Option<&'static GenerationOption> {
    GENERATION_OPTIONS.iter().find(|o| o.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::AspectRatio;

    #[test]
    fn preset_lookup_by_name() {
        assert_eq!(style_preset("anime").unwrap().prompt, "anime style, vibrant, detailed");
        assert!(style_preset("vaporwave").is_none());
    }

    #[test]
    fn option_lookup_by_id() {
        assert_eq!(
            generation_option("multi-pose").unwrap().label,
            "varied poses and angles"
        );
        assert!(generation_option("bogus").is_none());
    }

    #[test]
    fn all_listed_ratios_parse() {
        for s in ASPECT_RATIOS {
            AspectRatio::parse(s).unwrap();
        }
    }

    #[test]
    fn variant_counts_are_small_and_positive() {
        assert!(VARIANT_COUNTS.iter().all(|&c| (1..=4).contains(&c)));
    }
}
