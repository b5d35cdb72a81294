use crate::models::{ImageUpload, Season};
use crate::ui::components::{InputWidget, SelectWidget};
use crate::ui::Theme;
use crate::wizard::{FarmForm, FormField};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct DetailsScreen<'a> {
    pub form: &'a FarmForm,
    pub image: Option<&'a ImageUpload>,
}

impl<'a> DetailsScreen<'a> {
    pub fn new(form: &'a FarmForm, image: Option<&'a ImageUpload>) -> Self {
        Self { form, image }
    }

    fn placeholder(field: FormField) -> &'static str {
        match field {
            FormField::Location => "e.g., Pune, Maharashtra",
            FormField::Temperature => "e.g., 28",
            FormField::Rainfall => "e.g., 800",
            FormField::Humidity => "e.g., 65",
            FormField::PreviousCrop => "e.g., Wheat",
            FormField::Season => "",
        }
    }
}

impl Widget for DetailsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(20),   // Form + side panel
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Step 2", Theme::title()),
            Span::styled(" - Farm Details", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[1]);

        self.render_form(body[0], buf);
        self.render_side_panel(body[1], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓/Tab]", Theme::nav_key()),
            Span::styled("Field ", Theme::nav_label()),
            Span::styled("[←→]", Theme::nav_key()),
            Span::styled("Season ", Theme::nav_label()),
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Analyze ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back ", Theme::nav_label()),
            Span::styled("[Ctrl+Q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl DetailsScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Farm Details")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let constraints: Vec<Constraint> = FormField::all()
            .iter()
            .map(|_| Constraint::Length(3))
            .collect();

        let field_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in FormField::all().iter().enumerate() {
            let focused = *field == self.form.focused;
            let value = match field {
                FormField::Season => {
                    SelectWidget::new(field.label(), self.form.season.map(|s| s.as_str()))
                        .focused(focused)
                        .required(true)
                        .render(field_areas[i], buf);
                    continue;
                }
                FormField::Location => &self.form.location,
                FormField::Temperature => &self.form.temperature,
                FormField::Rainfall => &self.form.rainfall,
                FormField::Humidity => &self.form.humidity,
                FormField::PreviousCrop => &self.form.previous_crop,
            };

            InputWidget::new(field.label(), value)
                .placeholder(Self::placeholder(*field))
                .focused(focused)
                .required(field.is_required())
                .render(field_areas[i], buf);
        }
    }

    fn render_side_panel(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Summary")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();

        match self.image {
            Some(image) => {
                lines.push(Line::from(Span::styled("Soil image", Theme::header())));
                lines.push(Line::from(vec![
                    Span::styled("✓ ", Theme::success()),
                    Span::styled(image.file_name.as_str(), Theme::normal()),
                ]));
                lines.push(Line::from(Span::styled(image.size_label(), Theme::dim())));
            }
            None => {
                lines.push(Line::from(Span::styled("No image selected", Theme::warning())));
            }
        }
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("Seasons", Theme::header())));
        for season in Season::all() {
            let style = if self.form.season == Some(*season) {
                Theme::highlight()
            } else {
                Theme::dim()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<8}", season.as_str()), style),
                Span::styled(season.months(), Theme::dim()),
            ]));
        }
        lines.push(Line::from(""));

        let missing = self.form.missing_fields();
        if missing.is_empty() {
            lines.push(Line::from(Span::styled(
                "Ready to analyze",
                Theme::success(),
            )));
        } else {
            lines.push(Line::from(Span::styled("Still needed:", Theme::warning())));
            for field in missing {
                lines.push(Line::from(Span::styled(
                    format!("  • {}", field.label()),
                    Theme::dim(),
                )));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
