use std::path::PathBuf;
use thiserror::Error;

/// Per-record failure reasons. None of these abort the batch; the walker
/// logs a diagnostic and continues with the next record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing file: {0}")]
    MissingFile(PathBuf),

    #[error("unreadable image {path}: {source}")]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("missing field `{field}` in {path}")]
    MissingField { field: &'static str, path: PathBuf },

    /// The contour's coordinate sequences disagree in length. Fails the
    /// segmentation output only; the detection output is unaffected.
    #[error("contour has {xs} x coordinates but {ys} y coordinates")]
    MalformedContour { xs: usize, ys: usize },

    #[error("malformed annotation {path}: {message}")]
    MalformedRecord { path: PathBuf, message: String },

    #[error("failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type RecordResult<T> = Result<T, RecordError>;
