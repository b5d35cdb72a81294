use crate::ui::Theme;
use crate::wizard::WizardStep;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const STEPS: [(u8, &str); 3] = [(1, "Upload"), (2, "Details"), (3, "Results")];

/// `(1) Upload ── (2) Details ── (3) Results` with the current step highlighted.
pub struct StepIndicator {
    step: WizardStep,
}

impl StepIndicator {
    pub fn new(step: WizardStep) -> Self {
        Self { step }
    }

    /// Step number treated as "current". Loading still counts as Details.
    fn current(&self) -> u8 {
        self.step.number().unwrap_or(2)
    }
}

impl Widget for StepIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let current = self.current();
        let mut spans = Vec::new();

        for (i, (number, label)) in STEPS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ── ", Theme::dim()));
            }
            let style = if *number == current {
                Theme::step_active()
            } else if *number < current {
                Theme::step_done()
            } else {
                Theme::dim()
            };
            let marker = if *number < current {
                "✓".to_string()
            } else {
                number.to_string()
            };
            spans.push(Span::styled(format!(" {} {} ", marker, label), style));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
