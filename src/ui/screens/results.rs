use crate::render::view_model::{CropRow, PlanPanel, SoilCard};
use crate::render::ResultsView;
use crate::ui::components::ScoreBar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct ResultsScreen<'a> {
    pub view: &'a ResultsView,
}

impl<'a> ResultsScreen<'a> {
    pub fn new(view: &'a ResultsView) -> Self {
        Self { view }
    }
}

/// Parse `#rrggbb` into a terminal color.
pub fn swatch_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl Widget for ResultsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),      // Title
                Constraint::Percentage(45), // Soil + crops
                Constraint::Min(8),         // Plan + tips
                Constraint::Length(1),      // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Step 3", Theme::title()),
            Span::styled(" - Recommendations", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[1]);
        render_soil(&self.view.soil, top[0], buf);
        render_crops(&self.view.crops, top[1], buf);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);
        render_plan(&self.view.plan, bottom[0], buf);
        render_tips(&self.view.tips, bottom[1], buf);

        let nav = Line::from(vec![
            Span::styled("[d]", Theme::nav_key()),
            Span::styled("Download Report ", Theme::nav_label()),
            Span::styled("[n]", Theme::nav_key()),
            Span::styled("New Analysis ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

fn card(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Theme::border())
}

fn render_soil(soil: &SoilCard, area: Rect, buf: &mut Buffer) {
    let block = card("🔬 Soil Analysis");
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Type + swatch
            Constraint::Length(1), // Confidence label
            Constraint::Length(1), // Confidence bar
            Constraint::Min(0),    // Note
        ])
        .split(inner);

    let mut heading = vec![Span::styled(soil.soil_type.as_str(), Theme::title())];
    if let Some(color) = soil.color_hex.as_deref().and_then(swatch_color) {
        heading.push(Span::raw("  "));
        heading.push(Span::styled("    ", Style::default().bg(color)));
    }
    Paragraph::new(Line::from(heading)).render(rows[0], buf);

    Paragraph::new(Span::styled("AI Confidence", Theme::dim())).render(rows[1], buf);
    ScoreBar::new("", soil.confidence).render(rows[2], buf);

    Paragraph::new(Span::styled(soil.note, Theme::dim()))
        .wrap(Wrap { trim: true })
        .render(rows[3], buf);
}

fn render_crops(crops: &[CropRow], area: Rect, buf: &mut Buffer) {
    let block = card("🌾 Top Recommended Crops");
    let inner = block.inner(area);
    block.render(area, buf);

    if crops.is_empty() {
        Paragraph::new(Span::styled(
            "No crops recommended for these conditions",
            Theme::dim(),
        ))
        .render(inner, buf);
        return;
    }

    let label_width = crops
        .iter()
        .map(|c| c.name.chars().count() as u16 + 4)
        .max()
        .unwrap_or(0);

    let mut y = inner.y;
    for crop in crops {
        if y + 2 > inner.y + inner.height {
            break;
        }
        let label = format!("{}. {}", crop.rank, crop.name);
        ScoreBar::new(&label, crop.suitability)
            .label_width(label_width)
            .render(Rect { y, height: 1, ..inner }, buf);

        let details = Line::from(vec![
            Span::styled("   Yield: ", Theme::dim()),
            Span::styled(crop.expected_yield.as_str(), Theme::normal()),
            Span::styled("  Duration: ", Theme::dim()),
            Span::styled(crop.duration.as_str(), Theme::normal()),
            Span::styled("  Profit: ", Theme::dim()),
            Span::styled(crop.profit.as_str(), Theme::normal()),
        ]);
        Paragraph::new(details).render(Rect { y: y + 1, height: 1, ..inner }, buf);
        y += 2;
    }
}

fn render_plan(plan: &PlanPanel, area: Rect, buf: &mut Buffer) {
    let block = card("🧪 Fertilizer & Irrigation");
    let inner = block.inner(area);
    block.render(area, buf);

    let row = |label: &str, value: &str| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:<12}", label), Theme::dim()),
            Span::styled(value.to_string(), Theme::normal()),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled("NPK Requirements", Theme::header())),
        row("Nitrogen", &plan.nitrogen),
        row("Phosphorus", &plan.phosphorus),
        row("Potassium", &plan.potassium),
        row("Organic", &plan.organic),
    ];
    for (stage, share) in &plan.timing {
        lines.push(row(&format!("  {}", stage), share));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("💧 Irrigation", Theme::header())));
    lines.push(row("Frequency", &plan.frequency));
    lines.push(row("Method", &plan.method));
    lines.push(row("Water Need", &plan.water_requirement));
    if !plan.critical_stages.is_empty() {
        lines.push(row("Critical", &plan.critical_stages.join(", ")));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}

fn render_tips(tips: &[String], area: Rect, buf: &mut Buffer) {
    let block = card("💡 Expert Recommendations");
    let inner = block.inner(area);
    block.render(area, buf);

    let lines: Vec<Line> = tips
        .iter()
        .enumerate()
        .map(|(i, tip)| {
            Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Theme::highlight()),
                Span::styled(tip.as_str(), Theme::normal()),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::view_model::fixtures::sample_result;

    fn screen_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn swatch_parses_hex() {
        assert_eq!(swatch_color("#a0522d"), Some(Color::Rgb(160, 82, 45)));
        assert_eq!(swatch_color("a0522d"), None);
        assert_eq!(swatch_color("#zz0000"), None);
    }

    #[test]
    fn renders_all_four_panels() {
        let view = ResultsView::from_result(&sample_result());
        let area = Rect::new(0, 0, 140, 40);
        let mut buf = Buffer::empty(area);
        ResultsScreen::new(&view).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("Soil Analysis"));
        assert!(text.contains("Red Laterite Soil"));
        assert!(text.contains("1. Groundnut"));
        assert!(text.contains("Fertilizer & Irrigation"));
        assert!(text.contains("Expert Recommendations"));
    }
}
