use serde::Serialize;

use crate::error::GuideError;

/// Base recipe of a guide and the serving counts the serving picker allows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServingInfo {
    pub base_servings: u32,
    pub base_coffee_grams: f64,
    pub base_water_grams: f64,
    pub min_servings: u32,
    pub max_servings: u32,
}

/// Quantities for one serving count, rounded to whole grams for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledRecipe {
    pub servings: u32,
    pub coffee_grams: u32,
    pub water_grams: u32,
    pub bloom_grams: u32,
}

fn round_grams(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

impl ServingInfo {
    fn multiplier(&self, servings: u32) -> f64 {
        f64::from(servings) / f64::from(self.base_servings)
    }

    pub fn scaled_coffee(&self, servings: u32) -> u32 {
        round_grams(self.base_coffee_grams * self.multiplier(servings))
    }

    pub fn scaled_water(&self, servings: u32) -> u32 {
        round_grams(self.base_water_grams * self.multiplier(servings))
    }

    /// Twice the rounded coffee dose.
    pub fn scaled_bloom(&self, servings: u32) -> u32 {
        self.scaled_coffee(servings) * 2
    }

    pub fn contains(&self, servings: u32) -> bool {
        (self.min_servings..=self.max_servings).contains(&servings)
    }

    pub fn clamp(&self, servings: u32) -> u32 {
        servings.clamp(self.min_servings, self.max_servings)
    }

    pub fn scale(&self, servings: u32) -> Result<ScaledRecipe, GuideError> {
        if !self.contains(servings) {
            return Err(GuideError::ServingsOutOfRange {
                requested: servings,
                min: self.min_servings,
                max: self.max_servings,
            });
        }
        Ok(self.recipe_for(servings))
    }

    pub fn base_recipe(&self) -> ScaledRecipe {
        self.recipe_for(self.base_servings)
    }

    fn recipe_for(&self, servings: u32) -> ScaledRecipe {
        ScaledRecipe {
            servings,
            coffee_grams: self.scaled_coffee(servings),
            water_grams: self.scaled_water(servings),
            bloom_grams: self.scaled_bloom(servings),
        }
    }

    /// "1:16" style ratio of the base recipe.
    pub fn ratio(&self) -> f64 {
        self.base_water_grams / self.base_coffee_grams
    }
}
