pub mod html;
pub mod report;
pub mod text;
pub mod view_model;

pub use html::HtmlRenderer;
pub use text::TextRenderer;
pub use view_model::{format_percent, ResultsView};

/// A target the results view can be drawn onto.
pub trait ResultsRenderer {
    type Output;

    fn render(&self, view: &ResultsView) -> Self::Output;
}
