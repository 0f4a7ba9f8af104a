//! Errors for this crate.
//! About anyhow: see https://github.com/TrueLayer/reqwest-middleware/issues/119

use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum InvalidHostUrl {
    #[error("Given URL does not start with \"http://\" or \"https://\": {0}")]
    Protocol(String),
}

aliri_braid::from_infallible!(InvalidHostUrl);

/// Errors representing failed interactions with the AI Manager API.
#[derive(thiserror::Error, Debug)]
pub enum AimanError {
    /// A required argument was missing or empty.
    #[error("missing required argument: {0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Error response with an explanation from the service.
    #[error("[{status}] Reason: {reason}: {text}")]
    Http {
        status: StatusCode,
        reason: &'static str,
        text: String,
    },

    /// Error without any response from the service, e.g. connection refused or timeout.
    #[error(transparent)]
    Raw(#[from] reqwest::Error),

    /// Error from reqwest middleware function.
    #[error(transparent)]
    Middleware(anyhow::Error),

    /// Response body is not a `{"messageContent": {"data": ...}}` envelope,
    /// or its payload does not have the expected shape.
    #[error("malformed response: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The request body could not be serialized.
    #[error("could not serialize request body: {0}")]
    Body(serde_json::Error),

    #[error(transparent)]
    Loader(#[from] LoaderError),
}

/// Failure to obtain or renew an access token.
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("authentication rejected ({status} {reason}): {text}")]
    Rejected {
        status: StatusCode,
        reason: &'static str,
        text: String,
    },

    #[error("authentication request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication request failed: {0}")]
    Middleware(anyhow::Error),

    #[error("malformed authentication response: {0}")]
    Malformed(String),

    #[error("could not serialize authentication request: {0}")]
    Body(serde_json::Error),

    /// Neither a refresh token nor a username/password is available.
    #[error("token cannot be refreshed: no refresh token or login was given")]
    NotRefreshable,
}

/// An error which might occur while reading a local document.
#[derive(thiserror::Error, Debug)]
pub enum LoaderError {
    #[error("unsupported loader: \"{0}\"")]
    UnsupportedLoader(String),

    #[error("unsupported filetype: \"{extension}\" (file: {file})")]
    UnsupportedFileType { extension: String, file: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not read PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("could not read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("could not read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not read DOCX archive: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("could not read DOCX content: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Problem with configuration read from the environment.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: \"{value}\"")]
    Invalid { name: &'static str, value: String },

    #[error(transparent)]
    Host(#[from] InvalidHostUrl),
}

pub(crate) async fn check(res: reqwest::Response) -> Result<reqwest::Response, AimanError> {
    if is_success(res.status()) {
        return Ok(res);
    }
    let status = res.status();
    let reason = status.canonical_reason().unwrap_or("unknown reason");
    let text = res.text().await.map_err(AimanError::Raw)?;
    Err(AimanError::Http {
        status,
        reason,
        text,
    })
}

/// The service signals success with 200, 201 or 202 only.
pub(crate) fn is_success(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED
    )
}

impl From<reqwest_middleware::Error> for AimanError {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Middleware(e) => AimanError::Middleware(e),
            reqwest_middleware::Error::Reqwest(e) => AimanError::Raw(e),
        }
    }
}

impl From<reqwest_middleware::Error> for AuthError {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Middleware(e) => AuthError::Middleware(e),
            reqwest_middleware::Error::Reqwest(e) => AuthError::Transport(e),
        }
    }
}
