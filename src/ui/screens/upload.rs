use crate::client::validation::MAX_IMAGE_BYTES;
use crate::models::{format_size, ImageUpload};
use crate::ui::components::InputWidget;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct UploadScreen<'a> {
    pub image: Option<&'a ImageUpload>,
    pub path_input: &'a str,
}

impl<'a> UploadScreen<'a> {
    pub fn new(image: Option<&'a ImageUpload>, path_input: &'a str) -> Self {
        Self { image, path_input }
    }
}

impl Widget for UploadScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(7),    // Drop zone / preview
                Constraint::Length(3), // Path input
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Step 1", Theme::title()),
            Span::styled(" - Upload Soil Image", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        match self.image {
            Some(image) => self.render_preview(image, chunks[1], buf),
            None => self.render_drop_zone(chunks[1], buf),
        }

        InputWidget::new("Image path", self.path_input)
            .placeholder("Type or paste a file path, then press Enter")
            .focused(true)
            .render(chunks[2], buf);

        let mut nav = vec![
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Load ", Theme::nav_label()),
        ];
        if self.image.is_some() {
            nav.extend([
                Span::styled("[Tab]", Theme::nav_key()),
                Span::styled("Next ", Theme::nav_label()),
                Span::styled("[Del]", Theme::nav_key()),
                Span::styled("Remove ", Theme::nav_label()),
            ]);
        }
        nav.extend([
            Span::styled("[Ctrl+Q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(Line::from(nav)).render(chunks[3], buf);
    }
}

impl UploadScreen<'_> {
    fn render_drop_zone(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("📸 Drop a soil image here", Theme::header())),
            Line::from(Span::styled(
                "Drag a file onto the terminal or paste its path below",
                Theme::dim(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "JPG, PNG, GIF or BMP up to {}",
                    format_size(MAX_IMAGE_BYTES)
                ),
                Theme::dim(),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }

    fn render_preview(&self, image: &ImageUpload, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Selected Image")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("✓ ", Theme::success()),
                Span::styled(image.file_name.as_str(), Theme::header()),
            ]),
            Line::from(vec![
                Span::styled("Type: ", Theme::dim()),
                Span::styled(image.mime_type.as_str(), Theme::normal()),
            ]),
            Line::from(vec![
                Span::styled("Size: ", Theme::dim()),
                Span::styled(image.size_label(), Theme::normal()),
            ]),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
