use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Single-line text field. The cursor always sits at the end of the value.
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    required: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
            required: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

fn field_block(label: &str, focused: bool, required: bool) -> Block<'static> {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let mut title = vec![Span::raw(format!(" {}", label))];
    if required {
        title.push(Span::styled(" *", Theme::error()));
    }
    title.push(Span::raw(" "));

    Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border_style)
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = field_block(self.label, self.focused, self.required);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        if self.value.is_empty() && !self.placeholder.is_empty() && !self.focused {
            spans.push(Span::styled(self.placeholder, Theme::dim()));
        } else {
            spans.push(Span::styled(self.value, Theme::normal()));
        }
        if self.focused {
            spans.push(Span::styled(" ", Theme::selected()));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

/// Cycling choice field, shown as `< value >` while focused.
pub struct SelectWidget<'a> {
    label: &'a str,
    value: Option<&'a str>,
    placeholder: &'a str,
    focused: bool,
    required: bool,
}

impl<'a> SelectWidget<'a> {
    pub fn new(label: &'a str, value: Option<&'a str>) -> Self {
        Self {
            label,
            value,
            placeholder: "Select...",
            focused: false,
            required: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl Widget for SelectWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = field_block(self.label, self.focused, self.required);
        let inner = block.inner(area);
        block.render(area, buf);

        let line = match (self.value, self.focused) {
            (Some(v), true) => Line::from(Span::styled(format!("< {} >", v), Theme::highlight())),
            (Some(v), false) => Line::from(Span::styled(v, Theme::normal())),
            (None, true) => Line::from(Span::styled(
                format!("< {} >", self.placeholder),
                Theme::highlight(),
            )),
            (None, false) => Line::from(Span::styled(self.placeholder, Theme::dim())),
        };

        Paragraph::new(line).render(inner, buf);
    }
}
