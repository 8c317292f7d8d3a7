//! Saving generated variants and CLI output formatting.
//!
//! Display follows the entity pattern used elsewhere in the CLI: a header
//! line with the positional index and semantic identity (dimensions, mime),
//! then indented context lines with the filesystem path.
//!
//! ```text
//! Variants
//! 001 512x512 image/jpeg (34.2 KB)
//!     Saved: out/variant-1.jpg
//! 002 512x512 image/jpeg (35.0 KB)
//!     Saved: out/variant-2.jpg
//! ```

use crate::types::EncodedImage;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write each variant to `out_dir` as `variant-N.<ext>`, creating the
/// directory if needed. Returns the written paths in variant order.
pub fn save_variants(out_dir: &Path, variants: &[EncodedImage]) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut paths = Vec::with_capacity(variants.len());
    for (index, variant) in variants.iter().enumerate() {
        let path = out_dir.join(format!("variant-{}.{}", index + 1, variant.mime.extension()));
        fs::write(&path, &variant.data)?;
        paths.push(path);
    }
    Ok(paths)
}

/// One header + context block per saved variant.
pub fn format_variant_lines(variants: &[EncodedImage], paths: &[PathBuf]) -> Vec<String> {
    let mut lines = vec!["Variants".to_string()];
    for (index, (variant, path)) in variants.iter().zip(paths).enumerate() {
        lines.push(format!(
            "{:03} {}x{} {} ({})",
            index + 1,
            variant.width,
            variant.height,
            variant.mime.as_str(),
            human_size(variant.data.len()),
        ));
        lines.push(format!("    Saved: {}", path.display()));
    }
    lines
}

/// Print the summary block for a finished generation run.
pub fn print_generation_summary(variants: &[EncodedImage], paths: &[PathBuf]) {
    for line in format_variant_lines(variants, paths) {
        println!("{line}");
    }
}

fn human_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageMime;

    fn variant(mime: ImageMime, len: usize) -> EncodedImage {
        EncodedImage {
            data: vec![0; len],
            mime,
            width: 512,
            height: 512,
        }
    }

    #[test]
    fn saves_numbered_files_with_mime_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("out");

        let variants = vec![variant(ImageMime::Jpeg, 10), variant(ImageMime::Png, 20)];
        let paths = save_variants(&out, &variants).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("variant-1.jpg"));
        assert!(paths[1].ends_with("variant-2.png"));
        assert_eq!(fs::read(&paths[0]).unwrap().len(), 10);
        assert_eq!(fs::read(&paths[1]).unwrap().len(), 20);
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let paths = save_variants(tmp.path(), &[]).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn format_follows_entity_pattern() {
        let variants = vec![variant(ImageMime::Jpeg, 2048)];
        let paths = vec![PathBuf::from("out/variant-1.jpg")];

        let lines = format_variant_lines(&variants, &paths);
        assert_eq!(lines[0], "Variants");
        assert_eq!(lines[1], "001 512x512 image/jpeg (2.0 KB)");
        assert_eq!(lines[2], "    Saved: out/variant-1.jpg");
    }

    #[test]
    fn human_size_breakpoints() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(2 * 1024 * 1024), "2.0 MB");
    }
}
