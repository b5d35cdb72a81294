use serde::{Deserialize, Serialize};

/// Response body of a successful `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub soil_analysis: SoilAnalysis,
    #[serde(default)]
    pub recommended_crops: Vec<CropRecommendation>,
    pub fertilizer: FertilizerPlan,
    pub irrigation: IrrigationPlan,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub input_data: Option<InputEcho>,
}

impl AnalysisResult {
    pub fn top_crop(&self) -> Option<&CropRecommendation> {
        self.recommended_crops.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilAnalysis {
    pub soil_type: String,
    /// 0-100
    pub confidence: f64,
    #[serde(default)]
    pub rgb_values: Option<RgbValues>,
    #[serde(default)]
    pub brightness: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbValues {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbValues {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub name: String,
    /// 0-100
    pub suitability: f64,
    #[serde(rename = "yield")]
    pub expected_yield: String,
    pub duration: String,
    pub profit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerPlan {
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub organic: String,
    #[serde(default)]
    pub timing: Option<FertilizerTiming>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerTiming {
    pub basal: String,
    pub first_top: String,
    pub second_top: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationPlan {
    pub frequency: String,
    pub method: String,
    pub water_requirement: String,
    #[serde(default)]
    pub critical_stages: Vec<String>,
}

/// Farm details as echoed back by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputEcho {
    pub location: String,
    pub season: String,
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: f64,
}
