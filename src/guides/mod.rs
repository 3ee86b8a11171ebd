//! Static brew guides and serving-size scaling.

mod library;
pub mod scaler;
pub mod template;

use serde::Serialize;

use crate::{db::models::BrewMethod, error::GuideError};

pub use library::{all_guides, guide_for};
pub use scaler::{ScaledRecipe, ServingInfo};
pub use template::{InstructionTemplate, Quantity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    pub brew_time: &'static str,
    pub grind_size: &'static str,
    pub ratio: &'static str,
    pub ideal_for: &'static str,
    pub invented: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub name: &'static str,
    pub icon: &'static str,
    pub is_optional: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTimer {
    pub seconds: u32,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideStep {
    pub step_number: u32,
    pub title: &'static str,
    pub instruction: InstructionTemplate,
    pub timer: Option<StepTimer>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TroubleshootingItem {
    pub problem: &'static str,
    pub solution: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewGuide {
    pub method: BrewMethod,
    pub name: &'static str,
    pub short_description: &'static str,
    pub full_description: &'static str,
    pub difficulty: Difficulty,
    pub brew_time_range: &'static str,
    pub quick_stats: QuickStats,
    pub equipment: Vec<EquipmentItem>,
    pub steps: Vec<GuideStep>,
    pub tips: Vec<&'static str>,
    pub troubleshooting: Vec<TroubleshootingItem>,
    pub serving_info: ServingInfo,
}

/// A guide step with its quantities filled in for one serving count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedStep {
    pub step_number: u32,
    pub title: &'static str,
    pub instruction: String,
    pub timer_seconds: Option<u32>,
    pub timer_label: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledGuide {
    pub method: BrewMethod,
    pub name: &'static str,
    pub recipe: ScaledRecipe,
    pub steps: Vec<RenderedStep>,
}

impl BrewGuide {
    fn render_steps(&self, recipe: &ScaledRecipe) -> Vec<RenderedStep> {
        self.steps
            .iter()
            .map(|step| RenderedStep {
                step_number: step.step_number,
                title: step.title,
                instruction: step.instruction.render(recipe),
                timer_seconds: step.timer.as_ref().map(|timer| timer.seconds),
                timer_label: step.timer.as_ref().map(|timer| timer.label),
            })
            .collect()
    }

    /// Steps as written, for the guide's base serving count.
    pub fn base_steps(&self) -> Vec<RenderedStep> {
        self.render_steps(&self.serving_info.base_recipe())
    }

    pub fn steps_for_servings(&self, servings: u32) -> Result<Vec<RenderedStep>, GuideError> {
        let recipe = self.serving_info.scale(servings)?;
        Ok(self.render_steps(&recipe))
    }

    pub fn scaled(&self, servings: u32) -> Result<ScaledGuide, GuideError> {
        let recipe = self.serving_info.scale(servings)?;
        Ok(ScaledGuide {
            method: self.method,
            name: self.name,
            steps: self.render_steps(&recipe),
            recipe,
        })
    }

    pub fn required_equipment(&self) -> impl Iterator<Item = &EquipmentItem> {
        self.equipment.iter().filter(|item| !item.is_optional)
    }

    /// Sum of every step timer, in seconds.
    pub fn timed_seconds(&self) -> u32 {
        self.steps
            .iter()
            .filter_map(|step| step.timer.as_ref())
            .map(|timer| timer.seconds)
            .sum()
    }
}
