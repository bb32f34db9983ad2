//! Loading annotation records from MATLAB .mat files.
//!
//! MATLAB matrices are stored column-major, so a 2xN `obj_contour` arrives
//! interleaved: element (row, col) sits at `col * rows + row`. The readers
//! here de-interleave into the row sequences the transforms expect.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use matfile::{Array, MatFile, NumericData};

use crate::error::{RecordError, RecordResult};
use crate::types::{AnnotationRecord, BoxCoord, Contour};

/// Load one annotation record from a .mat file.
///
/// `box_coord` is required; `obj_contour` is optional (detection-only
/// records are valid).
pub fn load_record(path: &Path) -> RecordResult<AnnotationRecord> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RecordError::MissingFile(path.to_path_buf()),
        _ => RecordError::Io(e),
    })?;

    let mat = MatFile::parse(BufReader::new(file)).map_err(|e| RecordError::MalformedRecord {
        path: path.to_path_buf(),
        message: format!("{:?}", e),
    })?;

    let box_array = mat
        .find_by_name("box_coord")
        .ok_or_else(|| RecordError::MissingField {
            field: "box_coord",
            path: path.to_path_buf(),
        })?;
    let box_coord = parse_box_coord(box_array, path)?;

    let contour = mat.find_by_name("obj_contour").map(parse_contour);

    Ok(AnnotationRecord { box_coord, contour })
}

// box_coord row 0 holds (y1, y2, x1, x2); extra rows (multiple boxes per
// record) are ignored, only the first box is converted.
fn parse_box_coord(array: &Array, path: &Path) -> RecordResult<BoxCoord> {
    let values = first_row(array);
    if values.len() < 4 {
        return Err(RecordError::MalformedRecord {
            path: path.to_path_buf(),
            message: format!("box_coord has {} elements, expected 4", values.len()),
        });
    }

    Ok(BoxCoord {
        top: values[0],
        bottom: values[1],
        left: values[2],
        right: values[3],
    })
}

// obj_contour row 0 = x offsets, row 1 = y offsets. A matrix with fewer
// than two rows yields unequal sequences, which the segmentation transform
// reports as a malformed contour.
fn parse_contour(array: &Array) -> Contour {
    Contour {
        xs: matrix_row(array, 0),
        ys: matrix_row(array, 1),
    }
}

fn first_row(array: &Array) -> Vec<f64> {
    matrix_row(array, 0)
}

// Extract one row of a column-major matrix as f64 values.
fn matrix_row(array: &Array, row: usize) -> Vec<f64> {
    let data = real_values(array.data());
    let rows = array.size().first().copied().unwrap_or(0);
    if rows == 0 || row >= rows {
        return Vec::new();
    }

    data.chunks(rows)
        .filter_map(|column| column.get(row).copied())
        .collect()
}

// Annotation tools store these fields as doubles, but accept any numeric
// class rather than failing on a resaved file.
fn real_values(data: &NumericData) -> Vec<f64> {
    match data {
        NumericData::Int8 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt8 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::Int16 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt16 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::Int32 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt32 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::Int64 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt64 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::Single { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::Double { real, .. } => real.clone(),
    }
}
