use std::path::PathBuf;

/// Every failure is fatal for the run; no partial output is written.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse XML ({}): {source}", .path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Can not find {name} in {parent} ({})", .path.display())]
    MissingElement {
        path: PathBuf,
        parent: String,
        name: String,
    },

    #[error(
        "The size of {name} is supposed to be {expected}, but is {found} ({})",
        .path.display()
    )]
    Cardinality {
        path: PathBuf,
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{count} paths found in {}", .path.display())]
    AmbiguousPath { path: PathBuf, count: usize },

    #[error("Invalid value {value:?} for {name} ({})", .path.display())]
    InvalidNumber {
        path: PathBuf,
        name: String,
        value: String,
    },

    #[error(
        "Invalid bounding box [{xmin}, {ymin}, {xmax}, {ymax}] for {name} ({})",
        .path.display()
    )]
    InvalidBbox {
        path: PathBuf,
        name: String,
        xmin: i64,
        ymin: i64,
        xmax: i64,
        ymax: i64,
    },

    #[error("Integer overflow computing {name} ({})", .path.display())]
    Overflow { path: PathBuf, name: String },

    #[error("Failed to serialize COCO JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The directory is escaped before globbing, so this only surfaces if
    /// `glob` changes its escaping rules.
    #[error("Invalid input directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
