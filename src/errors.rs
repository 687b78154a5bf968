use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("backend request failed: {0}")]
    ClientError(#[from] reqwest::Error),
    #[error("backend request failed: {0} {1}")]
    HttpError(u16, String)
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal error")]
    InternalError,
    #[error("Bad request")]
    MalformedQuery,
    #[error("Request error")]
    RequestError(#[from] RequestError)
}
