use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Section {0} has no value line")]
    Truncated(String),

    #[error("Malformed record: {0}")]
    Malformed(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<StoreError> for common::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { .. } => common::Error::IoError(err.to_string()),
            StoreError::Truncated(_) | StoreError::Malformed(_) => {
                common::Error::MalformedData(err.to_string())
            }
        }
    }
}
