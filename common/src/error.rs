use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Ticker API error: {0}")]
    ApiError(String),

    #[error("Aborted by user: {0}")]
    UserAbort(String),
}
