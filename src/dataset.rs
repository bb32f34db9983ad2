use log::{info, warn};
use std::path::Path;

use crate::config::Args;
use crate::conversion::{to_detection_label, to_segmentation_label};
use crate::error::{RecordError, RecordResult};
use crate::io::{discover_annotations, setup_output_directories, write_label_file, OutputDirs};
use crate::mat::load_record;
use crate::types::{ImageDescriptor, ProcessingStats};
use crate::utils::{class_id_for_stem, create_progress_bar, find_paired_image};

/// Converter pipeline: turn every .mat record in the annotation directory
/// into YOLO label files.
///
/// Records are processed one at a time; a failing record is logged and
/// skipped, the batch always runs to completion.
pub fn process_dataset(args: &Args) -> Result<ProcessingStats, Box<dyn std::error::Error>> {
    let annotation_dir = Path::new(&args.annotation_dir);
    let image_dir = Path::new(&args.image_dir);

    let output_dirs = setup_output_directories(Path::new(&args.output_dir))?;
    let annotations = discover_annotations(annotation_dir);
    info!("Found {} annotation files.", annotations.len());

    let pb = create_progress_bar(annotations.len() as u64, "Convert");
    let mut stats = ProcessingStats::new();

    for path in &annotations {
        stats.increment_total();
        if let Err(e) = process_record(path, image_dir, &output_dirs, args, &mut stats) {
            warn!("Skipping {}: {}", path.display(), e);
            stats.record_failure(&e);
        }
        pb.inc(1);
    }

    pb.finish_with_message("Conversion complete");
    stats.print_summary();

    Ok(stats)
}

// Convert one record: pair the image, transform, write the label files.
// A malformed contour fails only the segmentation output; the detection
// label for the same record is still written.
fn process_record(
    path: &Path,
    image_dir: &Path,
    output_dirs: &OutputDirs,
    args: &Args,
    stats: &mut ProcessingStats,
) -> RecordResult<()> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| RecordError::MissingFile(path.to_path_buf()))?;

    let class_id = class_id_for_stem(stem, &args.label_list);

    let image_path = find_paired_image(image_dir, stem)
        .ok_or_else(|| RecordError::MissingFile(image_dir.join(stem)))?;
    let (width, height) =
        image::image_dimensions(&image_path).map_err(|e| RecordError::UnreadableImage {
            path: image_path.clone(),
            source: e,
        })?;
    let image = ImageDescriptor { width, height };

    let record = load_record(path)?;

    let (detection, origin) = to_detection_label(&record.box_coord, &image, class_id);
    let file_name = sanitize_filename::sanitize(stem);
    let detection_path = output_dirs
        .detection_dir
        .join(&file_name)
        .with_extension("txt");
    write_label_file(&detection_path, &detection.to_string())?;
    stats.increment_detection();

    if let Some(contour) = &record.contour {
        match to_segmentation_label(contour, &origin, class_id, &image) {
            Ok(segmentation) => {
                let segmentation_path = output_dirs
                    .segmentation_dir
                    .join(&file_name)
                    .with_extension("txt");
                write_label_file(&segmentation_path, &segmentation.to_string())?;
                stats.increment_segmentation();
            }
            Err(e) => {
                warn!(
                    "Segmentation label skipped for {}: {}",
                    path.display(),
                    e
                );
                stats.record_failure(&e);
            }
        }
    }

    Ok(())
}
