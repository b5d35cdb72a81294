use crate::models::AnalysisResult;

pub const SOIL_ANALYSIS_NOTE: &str = "Analysis based on color, texture, and pattern recognition";

/// Read-only projection of an [`AnalysisResult`] that every renderer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub soil: SoilCard,
    pub crops: Vec<CropRow>,
    pub plan: PlanPanel,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoilCard {
    pub soil_type: String,
    pub confidence: f64,
    pub confidence_label: String,
    pub color_hex: Option<String>,
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CropRow {
    pub rank: usize,
    pub name: String,
    pub suitability: f64,
    pub score_label: String,
    pub expected_yield: String,
    pub duration: String,
    pub profit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanPanel {
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub organic: String,
    /// (stage label, share) pairs, empty when the server sent no schedule.
    pub timing: Vec<(String, String)>,
    pub frequency: String,
    pub method: String,
    pub water_requirement: String,
    pub critical_stages: Vec<String>,
}

impl ResultsView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let soil = &result.soil_analysis;

        let crops = result
            .recommended_crops
            .iter()
            .enumerate()
            .map(|(i, crop)| {
                let suitability = crop.suitability.clamp(0.0, 100.0);
                CropRow {
                    rank: i + 1,
                    name: crop.name.clone(),
                    suitability,
                    score_label: format_percent(suitability),
                    expected_yield: crop.expected_yield.clone(),
                    duration: crop.duration.clone(),
                    profit: crop.profit.clone(),
                }
            })
            .collect();

        let timing = result
            .fertilizer
            .timing
            .as_ref()
            .map(|t| {
                vec![
                    ("Basal".to_string(), t.basal.clone()),
                    ("First top dressing".to_string(), t.first_top.clone()),
                    ("Second top dressing".to_string(), t.second_top.clone()),
                ]
            })
            .unwrap_or_default();

        let confidence = soil.confidence.clamp(0.0, 100.0);

        Self {
            soil: SoilCard {
                soil_type: soil.soil_type.clone(),
                confidence,
                confidence_label: format_percent(confidence),
                color_hex: soil.rgb_values.map(|rgb| rgb.hex()),
                note: SOIL_ANALYSIS_NOTE,
            },
            crops,
            plan: PlanPanel {
                nitrogen: result.fertilizer.nitrogen.clone(),
                phosphorus: result.fertilizer.phosphorus.clone(),
                potassium: result.fertilizer.potassium.clone(),
                organic: result.fertilizer.organic.clone(),
                timing,
                frequency: result.irrigation.frequency.clone(),
                method: result.irrigation.method.clone(),
                water_requirement: result.irrigation.water_requirement.clone(),
                critical_stages: result.irrigation.critical_stages.clone(),
            },
            tips: result.tips.clone(),
        }
    }
}

/// `95` -> "95%", `91.34` -> "91.3%".
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}%", value)
    } else {
        format!("{:.1}%", value)
    }
}
