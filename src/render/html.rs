use crate::error::Result;
use crate::render::view_model::{CropRow, PlanPanel, ResultsView, SoilCard};
use crate::render::ResultsRenderer;
use askama::Template;

#[derive(Template)]
#[template(path = "cards/soil.html")]
struct SoilCardTemplate<'a> {
    soil: &'a SoilCard,
}

#[derive(Template)]
#[template(path = "cards/crops.html")]
struct CropsCardTemplate<'a> {
    crops: &'a [CropRow],
}

#[derive(Template)]
#[template(path = "cards/plan.html")]
struct PlanCardTemplate<'a> {
    plan: &'a PlanPanel,
}

#[derive(Template)]
#[template(path = "cards/tips.html")]
struct TipsCardTemplate<'a> {
    tips: &'a [String],
}

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsTemplate {
    soil: String,
    crops: String,
    plan: String,
    tips: String,
}

/// Renders the four result cards as HTML fragments. Server text is escaped by the templates.
pub struct HtmlRenderer;

impl ResultsRenderer for HtmlRenderer {
    type Output = Result<String>;

    fn render(&self, view: &ResultsView) -> Result<String> {
        let page = ResultsTemplate {
            soil: soil_card(&view.soil)?,
            crops: crops_card(&view.crops)?,
            plan: plan_card(&view.plan)?,
            tips: tips_card(&view.tips)?,
        };
        Ok(page.render()?)
    }
}

pub fn soil_card(soil: &SoilCard) -> Result<String> {
    Ok(SoilCardTemplate { soil }.render()?)
}

pub fn crops_card(crops: &[CropRow]) -> Result<String> {
    Ok(CropsCardTemplate { crops }.render()?)
}

pub fn plan_card(plan: &PlanPanel) -> Result<String> {
    Ok(PlanCardTemplate { plan }.render()?)
}

pub fn tips_card(tips: &[String]) -> Result<String> {
    Ok(TipsCardTemplate { tips }.render()?)
}
