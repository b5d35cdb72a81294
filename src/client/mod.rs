pub mod api;
pub mod validation;

pub use api::{format_error, AnalysisBackend, ApiClient};
pub use validation::load_image;
