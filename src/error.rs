use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropwiseError {
    /// Client-side check that blocks a wizard transition.
    #[error("{0}")]
    Validation(String),

    /// Transport failure; the detail is logged, the user sees a generic message.
    #[error("Unable to reach the analysis server. Please check your connection.")]
    Network(String),

    /// Non-2xx from the analysis endpoint, carrying the server's message verbatim.
    #[error("{0}")]
    AnalysisFailed(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Template rendering error: {0}")]
    Template(#[from] askama::Error),
}

pub type Result<T> = std::result::Result<T, CropwiseError>;
