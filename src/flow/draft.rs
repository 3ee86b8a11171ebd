use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    db::models::{BrewMethod, BrewTime, CoffeeCustomizations, RoastLevel, ServingStyle},
    units::TemperatureUnit,
};

pub const GRIND_RANGE: (f64, f64) = (1.0, 10.0);
pub const RATING_RANGE: (f64, f64) = (1.0, 5.0);
pub const MAX_BREW_MINUTES: u32 = 30;

/// Clamp into `[min, max]` and snap to the nearest half step.
pub fn half_step(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() {
        return min;
    }
    ((value * 2.0).round() / 2.0).clamp(min, max)
}

/// Values gathered by the entry flow before they become a journal entry.
///
/// Water temperature is held in the display unit the user is looking at and
/// converted to Celsius on commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub coffee_name: String,
    pub origin: String,
    pub roaster: String,
    pub brew_method: Option<BrewMethod>,
    pub roast_level: Option<RoastLevel>,
    pub serving_style: Option<ServingStyle>,
    grind_size: f64,
    pub coffee_grams: f64,
    pub water_grams: f64,
    water_temperature: f64,
    temperature_unit: TemperatureUnit,
    brew_time: BrewTime,
    rating: f64,
    pub tasting_notes: Vec<String>,
    pub personal_notes: String,
    #[serde(skip)]
    pub photo: Option<Vec<u8>>,
    pub customizations: Option<CoffeeCustomizations>,
    pub logged_at: DateTime<Utc>,
}

impl EntryDraft {
    pub fn new(unit: TemperatureUnit) -> Self {
        Self {
            coffee_name: String::new(),
            origin: String::new(),
            roaster: String::new(),
            brew_method: None,
            roast_level: None,
            serving_style: None,
            grind_size: 5.0,
            coffee_grams: 18.0,
            water_grams: 300.0,
            water_temperature: unit.default_water_temperature(),
            temperature_unit: unit,
            brew_time: BrewTime::new(3, 0),
            rating: 3.0,
            tasting_notes: Vec::new(),
            personal_notes: String::new(),
            photo: None,
            customizations: None,
            // Stored timestamps keep microseconds.
            logged_at: Utc::now().trunc_subsecs(6),
        }
    }

    pub fn grind_size(&self) -> f64 {
        self.grind_size
    }

    pub fn set_grind_size(&mut self, value: f64) {
        self.grind_size = half_step(value, GRIND_RANGE);
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn set_rating(&mut self, value: f64) {
        self.rating = half_step(value, RATING_RANGE);
    }

    pub fn brew_time(&self) -> BrewTime {
        self.brew_time
    }

    pub fn set_brew_time(&mut self, minutes: u32, seconds: u32) {
        self.brew_time = BrewTime::new(minutes.min(MAX_BREW_MINUTES), seconds.min(59));
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.temperature_unit
    }

    /// Water temperature in [`Self::temperature_unit`].
    pub fn water_temperature(&self) -> f64 {
        self.water_temperature
    }

    pub fn set_water_temperature(&mut self, value: f64) {
        let range = self.temperature_unit.slider_range();
        self.water_temperature = value.clamp(*range.start(), *range.end());
    }

    pub fn water_temperature_celsius(&self) -> f64 {
        self.temperature_unit.to_celsius(self.water_temperature)
    }

    /// Re-expresses the current water temperature in `unit`.
    pub fn set_temperature_unit(&mut self, unit: TemperatureUnit) {
        if unit == self.temperature_unit {
            return;
        }
        let celsius = self.water_temperature_celsius();
        self.temperature_unit = unit;
        self.water_temperature = unit.from_celsius(celsius);
    }

    /// Adds the note, or removes it if already present. Order of first
    /// selection is kept.
    pub fn toggle_tasting_note(&mut self, note: &str) {
        let note = note.trim();
        if note.is_empty() {
            return;
        }
        if let Some(idx) = self.tasting_notes.iter().position(|existing| existing == note) {
            self.tasting_notes.remove(idx);
        } else {
            self.tasting_notes.push(note.to_string());
        }
    }

    pub fn brew_ratio(&self) -> Option<f64> {
        if self.coffee_grams > 0.0 {
            Some(self.water_grams / self.coffee_grams)
        } else {
            None
        }
    }
}

/// Partial update from a form field. Absent fields are left alone; present
/// ones go through the same setters as the step views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftPatch {
    pub coffee_name: Option<String>,
    pub origin: Option<String>,
    pub roaster: Option<String>,
    pub grind_size: Option<f64>,
    pub coffee_grams: Option<f64>,
    pub water_grams: Option<f64>,
    pub water_temperature: Option<f64>,
    pub brew_time: Option<BrewTime>,
    pub rating: Option<f64>,
    pub personal_notes: Option<String>,
    pub customizations: Option<CoffeeCustomizations>,
}

impl EntryDraft {
    pub fn apply(&mut self, patch: DraftPatch) {
        if let Some(value) = patch.coffee_name {
            self.coffee_name = value;
        }
        if let Some(value) = patch.origin {
            self.origin = value;
        }
        if let Some(value) = patch.roaster {
            self.roaster = value;
        }
        if let Some(value) = patch.grind_size {
            self.set_grind_size(value);
        }
        if let Some(value) = patch.coffee_grams {
            self.coffee_grams = value.max(0.0);
        }
        if let Some(value) = patch.water_grams {
            self.water_grams = value.max(0.0);
        }
        if let Some(value) = patch.water_temperature {
            self.set_water_temperature(value);
        }
        if let Some(value) = patch.brew_time {
            self.set_brew_time(value.minutes, value.seconds);
        }
        if let Some(value) = patch.rating {
            self.set_rating(value);
        }
        if let Some(value) = patch.personal_notes {
            self.personal_notes = value;
        }
        if let Some(value) = patch.customizations {
            self.customizations = Some(value);
        }
    }
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self::new(TemperatureUnit::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_typical_pour_over() {
        let draft = EntryDraft::default();
        assert_eq!(draft.grind_size(), 5.0);
        assert_eq!(draft.coffee_grams, 18.0);
        assert_eq!(draft.water_grams, 300.0);
        assert_eq!(draft.water_temperature(), 93.0);
        assert_eq!(draft.brew_time(), BrewTime::new(3, 0));
        assert_eq!(draft.rating(), 3.0);
        assert!(draft.brew_method.is_none());
        assert!(draft.tasting_notes.is_empty());
    }

    #[test]
    fn fahrenheit_draft_starts_at_converted_default() {
        let draft = EntryDraft::new(TemperatureUnit::Fahrenheit);
        assert!((draft.water_temperature() - 199.4).abs() < 1e-9);
        assert!((draft.water_temperature_celsius() - 93.0).abs() < 1e-9);
    }

    #[test]
    fn grind_and_rating_snap_to_half_steps_within_bounds() {
        let mut draft = EntryDraft::default();
        draft.set_grind_size(7.3);
        assert_eq!(draft.grind_size(), 7.5);
        draft.set_grind_size(0.2);
        assert_eq!(draft.grind_size(), 1.0);
        draft.set_grind_size(42.0);
        assert_eq!(draft.grind_size(), 10.0);

        draft.set_rating(4.2);
        assert_eq!(draft.rating(), 4.0);
        draft.set_rating(6.0);
        assert_eq!(draft.rating(), 5.0);
        draft.set_rating(f64::NAN);
        assert_eq!(draft.rating(), 1.0);
    }

    #[test]
    fn switching_units_keeps_the_same_physical_temperature() {
        let mut draft = EntryDraft::default();
        draft.set_water_temperature(96.0);
        draft.set_temperature_unit(TemperatureUnit::Fahrenheit);
        assert!((draft.water_temperature() - 204.8).abs() < 1e-9);
        assert!((draft.water_temperature_celsius() - 96.0).abs() < 1e-9);
    }

    #[test]
    fn water_temperature_clamps_to_slider() {
        let mut draft = EntryDraft::default();
        draft.set_water_temperature(120.0);
        assert_eq!(draft.water_temperature(), 100.0);
    }

    #[test]
    fn tasting_notes_toggle_in_selection_order() {
        let mut draft = EntryDraft::default();
        draft.toggle_tasting_note("Floral");
        draft.toggle_tasting_note("Citrus");
        draft.toggle_tasting_note("Berry");
        draft.toggle_tasting_note("Citrus");
        draft.toggle_tasting_note("  ");
        assert_eq!(draft.tasting_notes, vec!["Floral", "Berry"]);
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let mut draft = EntryDraft::default();
        draft.apply(DraftPatch {
            coffee_name: Some("Huila".into()),
            grind_size: Some(3.2),
            ..Default::default()
        });
        assert_eq!(draft.coffee_name, "Huila");
        assert_eq!(draft.grind_size(), 3.0);
        assert_eq!(draft.coffee_grams, 18.0);

        let patch: DraftPatch =
            serde_json::from_str(r#"{"rating":4.5,"brewTime":{"minutes":2,"seconds":90}}"#)
                .unwrap();
        draft.apply(patch);
        assert_eq!(draft.rating(), 4.5);
        assert_eq!(draft.brew_time(), BrewTime::new(2, 59));
        assert_eq!(draft.coffee_name, "Huila");
    }

    #[test]
    fn brew_time_is_bounded() {
        let mut draft = EntryDraft::default();
        draft.set_brew_time(4, 75);
        assert_eq!(draft.brew_time(), BrewTime::new(4, 59));
    }
}
