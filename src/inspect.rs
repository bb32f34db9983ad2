//! Inspector pipeline: render each annotation onto its image for visual
//! verification.
//!
//! Three views are written per record, matching what the converter will
//! encode: the image with its bounding box, the rasterized contour mask,
//! and the masked-out segmented region.

use log::{info, warn};
use std::fs;
use std::path::Path;

use image::RgbImage;

use crate::config::Args;
use crate::conversion::{contour_to_absolute, to_detection_label};
use crate::error::{RecordError, RecordResult};
use crate::io::discover_annotations;
use crate::mask::{apply_mask, draw_box_overlay, rasterize_contour};
use crate::mat::load_record;
use crate::types::ImageDescriptor;
use crate::utils::{class_id_for_stem, create_progress_bar, find_paired_image};

/// Render previews for every .mat record in the annotation directory.
pub fn inspect_dataset(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let annotation_dir = Path::new(&args.annotation_dir);
    let image_dir = Path::new(&args.image_dir);
    let preview_dir = Path::new(&args.preview_dir);
    fs::create_dir_all(preview_dir)?;

    let annotations = discover_annotations(annotation_dir);
    info!("Found {} annotation files.", annotations.len());

    let pb = create_progress_bar(annotations.len() as u64, "Inspect");
    for path in &annotations {
        if let Err(e) = inspect_record(path, image_dir, preview_dir, args) {
            warn!("Skipping {}: {}", path.display(), e);
        }
        pb.inc(1);
    }
    pb.finish_with_message("Inspection complete");

    Ok(())
}

fn inspect_record(
    path: &Path,
    image_dir: &Path,
    preview_dir: &Path,
    args: &Args,
) -> RecordResult<()> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| RecordError::MissingFile(path.to_path_buf()))?;

    let image_path = find_paired_image(image_dir, stem)
        .ok_or_else(|| RecordError::MissingFile(image_dir.join(stem)))?;
    let image = image::open(&image_path)
        .map_err(|e| RecordError::UnreadableImage {
            path: image_path.clone(),
            source: e,
        })?
        .to_rgb8();

    let record = load_record(path)?;
    let file_name = sanitize_filename::sanitize(stem);

    let boxed = draw_box_overlay(&image, &record.box_coord);
    save_preview(&boxed, &preview_dir.join(format!("{}_boxes.png", file_name)))?;

    // Contour-less records are valid; they get the box view only.
    if let Some(contour) = &record.contour {
        let descriptor = ImageDescriptor {
            width: image.width(),
            height: image.height(),
        };
        let class_id = class_id_for_stem(stem, &args.label_list);
        let (_, origin) = to_detection_label(&record.box_coord, &descriptor, class_id);

        let points = contour_to_absolute(contour, &origin)?;
        let mask = rasterize_contour(&points, image.width(), image.height());
        let segmented = apply_mask(&image, &mask);

        let mask_path = preview_dir.join(format!("{}_mask.png", file_name));
        mask.save(&mask_path).map_err(|e| RecordError::ImageWrite {
            path: mask_path.clone(),
            source: e,
        })?;
        save_preview(
            &segmented,
            &preview_dir.join(format!("{}_segmented.png", file_name)),
        )?;
    }

    Ok(())
}

fn save_preview(image: &RgbImage, path: &Path) -> RecordResult<()> {
    image.save(path).map_err(|e| RecordError::ImageWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
