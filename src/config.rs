use clap::{Parser, ValueEnum};

/// Command-line arguments parser for converting MATLAB annotations to YOLO format.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory containing the source images
    #[arg(short = 'i', long = "image_dir")]
    pub image_dir: String,

    /// Directory containing the MATLAB .mat annotation files
    #[arg(short = 'a', long = "annotation_dir")]
    pub annotation_dir: String,

    /// Output root; labels go to detection/ and segmentation/ below it
    #[arg(short = 'o', long = "output_dir", default_value = "yolo_labels")]
    pub output_dir: String,

    /// Directory where inspection previews are written
    #[arg(long = "preview_dir", default_value = "inspection")]
    pub preview_dir: String,

    /// Pipeline to run: 'convert' writes label files, 'inspect' renders previews
    #[arg(long = "mode", value_enum, default_value = "convert")]
    pub mode: Mode,

    /// Ordered class names; the filename prefix before the first '_' selects
    /// the class id by position, unknown prefixes fall back to id 1
    #[arg(use_value_delimiter = true, default_value = "cannon")]
    pub label_list: Vec<String>,
}

// Enumeration for the two processing pipelines
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Mode {
    Convert,
    Inspect,
}
