use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Source directory does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    #[error("Unable to read creation time of {}: {source}", path.display())]
    Timestamp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to render date format '{0}'")]
    DateFormat(String),

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Path has no file name: {}", .0.display())]
    MissingFileName(PathBuf),

    #[error("Not a regular file: {}", .0.display())]
    NotRegularFile(PathBuf),

    #[error("Source and target are the same file: {}", .0.display())]
    SameFile(PathBuf),
}
