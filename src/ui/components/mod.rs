pub mod gauge;
pub mod input;
pub mod notification;
pub mod step_indicator;

pub use gauge::ScoreBar;
pub use input::{InputWidget, SelectWidget};
pub use notification::ToastStack;
pub use step_indicator::StepIndicator;
