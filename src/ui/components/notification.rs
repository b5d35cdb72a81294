use crate::notifications::Notification;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;

/// Stack of toasts pinned to the top-right corner, newest at the bottom.
pub struct ToastStack<'a> {
    items: Vec<&'a Notification>,
}

impl<'a> ToastStack<'a> {
    pub fn new(items: impl Iterator<Item = &'a Notification>) -> Self {
        Self {
            items: items.collect(),
        }
    }
}

/// Where toast `index` goes inside `area`, or None when it would not fit.
pub fn toast_area(area: Rect, index: u16) -> Option<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let y = area.y + 1 + index * TOAST_HEIGHT;
    if width < 10 || y + TOAST_HEIGHT > area.y + area.height {
        return None;
    }
    Some(Rect {
        x: area.x + area.width - width,
        y,
        width,
        height: TOAST_HEIGHT,
    })
}

impl Widget for ToastStack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, note) in self.items.iter().enumerate() {
            let Some(slot) = toast_area(area, i as u16) else {
                break;
            };
            let color = note.level.color();

            Clear.render(slot, buf);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color));
            let inner = block.inner(slot);
            block.render(slot, buf);

            let line = Line::from(vec![
                Span::styled(format!("{} ", note.level.symbol()), Style::default().fg(color)),
                Span::styled(note.message.as_str(), Theme::normal()),
            ]);
            Paragraph::new(line)
                .wrap(Wrap { trim: true })
                .render(inner, buf);
        }
    }
}
