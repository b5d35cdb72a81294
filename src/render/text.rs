use crate::render::view_model::ResultsView;
use crate::render::ResultsRenderer;
use std::fmt::Write;

/// Plain-text rendering for the headless `analyze` command.
pub struct TextRenderer {
    pub width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { width: 60 }
    }
}

impl TextRenderer {
    fn heading(&self, out: &mut String, title: &str) {
        let _ = writeln!(out, "{}", title);
        let _ = writeln!(out, "{}", "-".repeat(self.width.min(title.chars().count().max(8))));
    }

    fn bar(&self, score: f64) -> String {
        let cells = 20usize;
        let filled = ((score / 100.0) * cells as f64).round() as usize;
        let filled = filled.min(cells);
        format!("{}{}", "█".repeat(filled), "░".repeat(cells - filled))
    }
}

impl ResultsRenderer for TextRenderer {
    type Output = String;

    fn render(&self, view: &ResultsView) -> String {
        let mut out = String::new();

        self.heading(&mut out, "Soil Analysis");
        let _ = writeln!(out, "Soil type:  {}", view.soil.soil_type);
        let _ = writeln!(
            out,
            "Confidence: {} {}",
            self.bar(view.soil.confidence),
            view.soil.confidence_label
        );
        let _ = writeln!(out);

        self.heading(&mut out, "Recommended Crops");
        if view.crops.is_empty() {
            let _ = writeln!(out, "No crops recommended for these conditions");
        }
        for crop in &view.crops {
            let _ = writeln!(
                out,
                "{}. {} {} {}",
                crop.rank,
                crop.name,
                self.bar(crop.suitability),
                crop.score_label
            );
            let _ = writeln!(
                out,
                "   Yield: {} | Duration: {} | Profit: {}",
                crop.expected_yield, crop.duration, crop.profit
            );
        }
        let _ = writeln!(out);

        self.heading(&mut out, "Fertilizer & Irrigation");
        let _ = writeln!(out, "Nitrogen:   {}", view.plan.nitrogen);
        let _ = writeln!(out, "Phosphorus: {}", view.plan.phosphorus);
        let _ = writeln!(out, "Potassium:  {}", view.plan.potassium);
        let _ = writeln!(out, "Organic:    {}", view.plan.organic);
        for (stage, share) in &view.plan.timing {
            let _ = writeln!(out, "  {}: {}", stage, share);
        }
        let _ = writeln!(out, "Frequency:  {}", view.plan.frequency);
        let _ = writeln!(out, "Method:     {}", view.plan.method);
        let _ = writeln!(out, "Water need: {}", view.plan.water_requirement);
        let _ = writeln!(out);

        self.heading(&mut out, "Expert Tips");
        for (i, tip) in view.tips.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, tip);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::view_model::fixtures::sample_result;

    #[test]
    fn text_contains_all_sections() {
        let view = ResultsView::from_result(&sample_result());
        let text = TextRenderer::default().render(&view);
        assert!(text.contains("Soil type:  Red Laterite Soil"));
        assert!(text.contains("1. Groundnut"));
        assert!(text.contains("Yield: 2.4 tons/ha | Duration: 100-130 days | Profit: High"));
        assert!(text.contains("Nitrogen:   120 kg/ha"));
        assert!(text.contains("2. Low rainfall detected"));
    }

    #[test]
    fn bar_is_bounded() {
        let r = TextRenderer::default();
        assert_eq!(r.bar(0.0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(r.bar(100.0).chars().filter(|c| *c == '█').count(), 20);
        assert_eq!(r.bar(50.0).chars().count(), 20);
    }
}
