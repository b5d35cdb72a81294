pub mod components;
pub mod screens;
mod theme;

pub use theme::Theme;

use crate::wizard::{Wizard, WizardStep};
use components::{StepIndicator, ToastStack};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use screens::{DetailsScreen, LoadingScreen, ResultsScreen, UploadScreen};

/// Draw one frame for the wizard's current step.
pub fn draw(frame: &mut Frame, wizard: &Wizard, tick: usize) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // App header
            Constraint::Length(1), // Step indicator
            Constraint::Min(10),   // Screen
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled("🌱 Cropwise", Theme::title()),
        Span::styled(" - ", Theme::dim()),
        Span::styled(wizard.step().title(), Theme::header()),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);
    frame.render_widget(StepIndicator::new(wizard.step()), chunks[1]);

    match wizard.step() {
        WizardStep::Upload => frame.render_widget(
            UploadScreen::new(wizard.image(), &wizard.path_input),
            chunks[2],
        ),
        WizardStep::Details => frame.render_widget(
            DetailsScreen::new(&wizard.form, wizard.image()),
            chunks[2],
        ),
        WizardStep::Loading => frame.render_widget(LoadingScreen::new(tick), chunks[2]),
        WizardStep::Results => match wizard.results_view() {
            Some(view) => frame.render_widget(ResultsScreen::new(&view), chunks[2]),
            None => frame.render_widget(
                Paragraph::new(Span::styled("No results", Theme::dim())),
                chunks[2],
            ),
        },
    }

    frame.render_widget(ToastStack::new(wizard.notifications.active()), area);
}
