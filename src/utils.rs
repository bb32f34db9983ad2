use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::types::IMG_FORMATS;

/// Derive the class id from an annotation filename stem.
///
/// The prefix before the first '_' is looked up in the ordered class-name
/// list; anything not listed falls back to id 1. This mirrors the dataset's
/// naming convention and is a fixed policy, not a classifier.
pub fn class_id_for_stem(stem: &str, label_list: &[String]) -> u32 {
    let prefix = stem.split('_').next().unwrap_or(stem);
    label_list
        .iter()
        .position(|label| label == prefix)
        .map(|id| id as u32)
        .unwrap_or(1)
}

/// Find the image paired with an annotation by shared filename stem,
/// trying each known raster extension in turn.
pub fn find_paired_image(image_dir: &Path, stem: &str) -> Option<PathBuf> {
    IMG_FORMATS
        .iter()
        .map(|ext| image_dir.join(stem).with_extension(ext))
        .find(|candidate| candidate.exists())
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(&format!(
            "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
            label
        ))
        .expect("progress bar template is valid")
        .progress_chars("#>-"),
    );
    pb
}
