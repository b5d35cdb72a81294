pub mod details;
pub mod loading;
pub mod results;
pub mod upload;

pub use details::DetailsScreen;
pub use loading::LoadingScreen;
pub use results::ResultsScreen;
pub use upload::UploadScreen;
