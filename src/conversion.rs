//! The coordinate transform from absolute-pixel annotations to normalized
//! YOLO labels.
//!
//! `box_coord` stores (y1, y2, x1, x2) while the YOLO encodings are x-first;
//! everything here goes through the named `BoxCoord` fields so the axis
//! order is fixed in exactly one place. Values are normalized by the
//! matching image dimension and deliberately not clamped: a result outside
//! [0,1] means the box or contour does not fit the image, and the caller
//! must be able to see that.

use crate::error::{RecordError, RecordResult};
use crate::types::{BoxCoord, BoxOrigin, Contour, DetectionLabel, ImageDescriptor, SegmentationLabel};

/// Convert a bounding box to a YOLO detection label.
///
/// Also returns the box's top-left corner: contour points are stored
/// relative to it, so the segmentation transform needs it to reconstruct
/// absolute coordinates.
pub fn to_detection_label(
    box_coord: &BoxCoord,
    image: &ImageDescriptor,
    class_id: u32,
) -> (DetectionLabel, BoxOrigin) {
    let image_width = image.width as f64;
    let image_height = image.height as f64;

    let x_center = (box_coord.left + box_coord.right) / 2.0 / image_width;
    let y_center = (box_coord.top + box_coord.bottom) / 2.0 / image_height;
    let width = box_coord.width() / image_width;
    let height = box_coord.height() / image_height;

    let label = DetectionLabel {
        class_id,
        x_center,
        y_center,
        width,
        height,
    };
    let origin = BoxOrigin {
        x: box_coord.left,
        y: box_coord.top,
    };

    (label, origin)
}

/// Shift box-relative contour offsets to absolute pixel coordinates.
///
/// Point order is preserved; it defines the polygon winding. Mismatched
/// sequence lengths are an error, never truncated.
pub fn contour_to_absolute(contour: &Contour, origin: &BoxOrigin) -> RecordResult<Vec<(f64, f64)>> {
    if contour.xs.len() != contour.ys.len() {
        return Err(RecordError::MalformedContour {
            xs: contour.xs.len(),
            ys: contour.ys.len(),
        });
    }

    Ok(contour
        .xs
        .iter()
        .zip(&contour.ys)
        .map(|(&x, &y)| (x + origin.x, y + origin.y))
        .collect())
}

/// Convert a box-relative contour to a YOLO segmentation label.
///
/// Each offset is shifted by the box origin to absolute pixels, then
/// normalized by the matching image dimension.
pub fn to_segmentation_label(
    contour: &Contour,
    origin: &BoxOrigin,
    class_id: u32,
    image: &ImageDescriptor,
) -> RecordResult<SegmentationLabel> {
    let image_width = image.width as f64;
    let image_height = image.height as f64;

    let points = contour_to_absolute(contour, origin)?
        .into_iter()
        .map(|(x, y)| (x / image_width, y / image_height))
        .collect();

    Ok(SegmentationLabel { class_id, points })
}
