use glob::glob;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// Paths to the two label output directories
pub struct OutputDirs {
    pub detection_dir: PathBuf,
    pub segmentation_dir: PathBuf,
}

/// Set up the detection/ and segmentation/ directories under the output
/// root, creating them if absent. Existing contents are left alone.
pub fn setup_output_directories(output_root: &Path) -> std::io::Result<OutputDirs> {
    let detection_dir = output_root.join("detection");
    let segmentation_dir = output_root.join("segmentation");
    fs::create_dir_all(&detection_dir)?;
    fs::create_dir_all(&segmentation_dir)?;

    Ok(OutputDirs {
        detection_dir,
        segmentation_dir,
    })
}

/// Enumerate the .mat annotation files in a directory, sorted by path.
pub fn discover_annotations(annotation_dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/*.mat", annotation_dir.display());
    let mut paths: Vec<_> = glob(&pattern)
        .expect("annotation glob pattern is valid")
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort();
    paths
}

/// Write a single-line label file.
pub fn write_label_file(path: &Path, line: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", line)
}
