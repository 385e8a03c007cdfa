use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Transport-level failure talking to the render service.
    #[error("network error: {0}")]
    Network(String),

    /// The render service answered with a non-success status.
    #[error("render API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The target page could not be reached at all.
    #[error("navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },

    /// The expected content never appeared within the wait bound.
    #[error("timed out waiting for '{selector}' at {url}")]
    Timeout { url: String, selector: String },

    /// A structural lookup matched nothing in the rendered document.
    #[error("no element matched '{selector}'")]
    NotFound { selector: String },

    /// The descriptor itself could not be parsed as a CSS selector.
    #[error("invalid selector: {0}")]
    Selector(String),
}

impl RenderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RenderError::Timeout { .. })
    }
}
