use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Shown while the analysis request is in flight. Input is ignored on this step.
pub struct LoadingScreen {
    pub tick: usize,
}

impl LoadingScreen {
    pub fn new(tick: usize) -> Self {
        Self { tick }
    }
}

impl Widget for LoadingScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Length(7),
                Constraint::Min(0),
            ])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());
        let inner = block.inner(chunks[1]);
        block.render(chunks[1], buf);

        let spinner = SPINNER[self.tick % SPINNER.len()];
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("{} ", spinner), Theme::highlight()),
                Span::styled("Analyzing your soil image...", Theme::header()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Matching soil type, climate and season to suitable crops",
                Theme::dim(),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
