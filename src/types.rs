use std::fmt;

use crate::error::RecordError;

// Image extensions tried when pairing an annotation with its image
pub const IMG_FORMATS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp"];

/// Axis-aligned bounding box in absolute pixel units.
///
/// `box_coord` stores the scalars in order (y1, y2, x1, x2); the fields are
/// named after their geometric meaning so the y-first storage order can
/// never silently swap an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCoord {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl BoxCoord {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// The top-left corner of a bounding box, in absolute pixel units.
///
/// Contour offsets are anchored here; the detection transform hands this to
/// the segmentation transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxOrigin {
    pub x: f64,
    pub y: f64,
}

/// Closed polygon boundary stored as two parallel coordinate sequences,
/// relative to the owning box's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

// One annotation record, as loaded from a .mat file. A missing contour is
// valid; a missing box is not and never reaches this type.
#[derive(Debug, Clone)]
pub struct AnnotationRecord {
    pub box_coord: BoxCoord,
    pub contour: Option<Contour>,
}

/// Pixel dimensions of the image paired with an annotation record.
#[derive(Debug, Clone, Copy)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
}

/// One YOLO detection label: class id plus center/size normalized to [0,1].
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionLabel {
    pub class_id: u32,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl fmt::Display for DetectionLabel {
    // Six decimal digits is a compatibility contract with YOLO tooling
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {:.6} {:.6} {:.6}",
            self.class_id, self.x_center, self.y_center, self.width, self.height
        )
    }
}

/// One YOLO segmentation label: class id plus ordered normalized vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationLabel {
    pub class_id: u32,
    pub points: Vec<(f64, f64)>,
}

impl fmt::Display for SegmentationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_id)?;
        for &(x, y) in &self.points {
            write!(f, " {:.6} {:.6}", x, y)?;
        }
        Ok(())
    }
}

// Counters reported at the end of a batch run
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub total_records: usize,
    pub detection_labels: usize,
    pub segmentation_labels: usize,
    pub skipped_missing_file: usize,
    pub skipped_unreadable_image: usize,
    pub skipped_missing_field: usize,
    pub skipped_malformed_record: usize,
    pub malformed_contours: usize,
    pub failed_io: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_total(&mut self) {
        self.total_records += 1;
    }

    pub fn increment_detection(&mut self) {
        self.detection_labels += 1;
    }

    pub fn increment_segmentation(&mut self) {
        self.segmentation_labels += 1;
    }

    /// Attribute a per-record failure to the matching counter.
    pub fn record_failure(&mut self, error: &RecordError) {
        match error {
            RecordError::MissingFile(_) => self.skipped_missing_file += 1,
            RecordError::UnreadableImage { .. } => self.skipped_unreadable_image += 1,
            RecordError::MissingField { .. } => self.skipped_missing_field += 1,
            RecordError::MalformedContour { .. } => self.malformed_contours += 1,
            RecordError::MalformedRecord { .. } => self.skipped_malformed_record += 1,
            RecordError::ImageWrite { .. } | RecordError::Io(_) => self.failed_io += 1,
        }
    }

    pub fn skipped_records(&self) -> usize {
        self.skipped_missing_file
            + self.skipped_unreadable_image
            + self.skipped_missing_field
            + self.skipped_malformed_record
            + self.failed_io
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Total records processed: {}", self.total_records);
        log::info!("Detection labels written: {}", self.detection_labels);
        log::info!("Segmentation labels written: {}", self.segmentation_labels);

        if self.skipped_records() > 0 {
            log::warn!(
                "Skipped records: {} (missing file: {}, unreadable image: {}, missing box_coord: {}, malformed record: {}, io: {})",
                self.skipped_records(),
                self.skipped_missing_file,
                self.skipped_unreadable_image,
                self.skipped_missing_field,
                self.skipped_malformed_record,
                self.failed_io
            );
        }
        if self.malformed_contours > 0 {
            log::warn!(
                "Records with malformed contours (detection label kept): {}",
                self.malformed_contours
            );
        }
    }
}
