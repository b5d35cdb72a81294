use crate::render::format_percent;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One-line percentage bar: `label ████████░░░░ 91%`.
pub struct ScoreBar<'a> {
    label: &'a str,
    score: f64,
    label_width: u16,
}

impl<'a> ScoreBar<'a> {
    pub fn new(label: &'a str, score: f64) -> Self {
        Self {
            label,
            score: score.clamp(0.0, 100.0),
            label_width: 0,
        }
    }

    pub fn label_width(mut self, width: u16) -> Self {
        self.label_width = width;
        self
    }
}

/// Number of filled cells out of `width` for a 0-100 score.
pub fn filled_cells(score: f64, width: u16) -> u16 {
    let ratio = (score / 100.0).clamp(0.0, 1.0);
    ((width as f64) * ratio).round() as u16
}

impl Widget for ScoreBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 12 {
            return;
        }

        let color = Theme::score_color(self.score);
        let value = format_percent(self.score);
        let label_width = if self.label.is_empty() {
            0
        } else {
            self.label_width
                .max(self.label.chars().count() as u16 + 1)
                .min(area.width / 2)
        };
        let value_width = value.chars().count() as u16 + 1;
        let bar_width = area.width.saturating_sub(label_width + value_width);

        if label_width > 0 {
            let label_area = Rect {
                width: label_width,
                height: 1,
                ..area
            };
            Paragraph::new(Span::styled(self.label, Theme::normal())).render(label_area, buf);
        }

        let filled = filled_cells(self.score, bar_width);
        let bar_x = area.x + label_width;
        for x in bar_x..bar_x + bar_width {
            let ch = if x < bar_x + filled { '█' } else { '░' };
            buf[(x, area.y)].set_char(ch).set_fg(color);
        }

        let value_area = Rect {
            x: bar_x + bar_width + 1,
            y: area.y,
            width: value_width.saturating_sub(1),
            height: 1,
        };
        Paragraph::new(Line::from(Span::styled(value, Style::default().fg(color))))
            .render(value_area, buf);
    }
}
