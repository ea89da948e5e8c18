use core::time::Duration;

use tokio_rustls::rustls::pki_types::InvalidDnsNameError;
use workshop_booking_config::ConfigError;

/// Failure talking to the workshop service.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("webserver error: {0}")]
    Hyper(#[from] hyper::Error),
    #[error("http error: {0}")]
    Http(#[from] http::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid dns name: {0}")]
    DnsName(#[from] InvalidDnsNameError),
    #[error("unsupported url scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
    #[error("url has no host: {0}")]
    MissingHost(String),
    /// The service answered with an error status, `message` is its `msg`.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("service reported failure")]
    Unsuccessful,
    #[error("service acknowledged without returning the workshop")]
    MissingWorkshop,
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Service(#[from] ServiceError),
}
