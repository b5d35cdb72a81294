pub mod analysis;
pub mod health;
pub mod submission;

pub use analysis::*;
pub use health::*;
pub use submission::*;
