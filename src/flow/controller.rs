use log::{debug, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::models::{BrewMethod, CoffeeEntry, RoastLevel, ServingStyle},
    display,
    error::ValidationError,
    photo::PhotoCompressor,
    units::TemperatureUnit,
};

use super::{EntryDraft, EntryStep, FlowVariant};

/// What the entry screen renders for the current step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowView {
    pub variant: FlowVariant,
    pub step: EntryStep,
    pub step_number: usize,
    pub total_steps: usize,
    pub progress: f64,
    pub question: &'static str,
    pub encouragement: Option<&'static str>,
    pub can_go_back: bool,
    pub can_skip: bool,
    pub can_advance: bool,
    pub draft: EntryDraft,
    pub display: display::EntryDisplay,
}

/// Walks the user through one journal entry, a step at a time.
///
/// Navigation is a current step plus a history stack, so going back always
/// returns to the step the user actually came from.
#[derive(Debug, Clone)]
pub struct EntryFlow {
    variant: FlowVariant,
    current: EntryStep,
    history: Vec<EntryStep>,
    draft: EntryDraft,
    auto_advance: bool,
}

impl EntryFlow {
    pub fn new(variant: FlowVariant, unit: TemperatureUnit) -> Self {
        Self {
            variant,
            current: variant.first_step(),
            history: Vec::new(),
            draft: EntryDraft::new(unit),
            auto_advance: true,
        }
    }

    /// Selection helpers only record the value; the caller advances.
    pub fn without_auto_advance(mut self) -> Self {
        self.auto_advance = false;
        self
    }

    pub fn variant(&self) -> FlowVariant {
        self.variant
    }

    pub fn current_step(&self) -> EntryStep {
        self.current
    }

    pub fn history(&self) -> &[EntryStep] {
        &self.history
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EntryDraft {
        &mut self.draft
    }

    pub fn is_on_review(&self) -> bool {
        self.variant.is_terminal(self.current)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_skip(&self) -> bool {
        self.is_step_optional(self.current)
    }

    pub fn is_step_optional(&self, step: EntryStep) -> bool {
        self.variant.is_step_optional(step)
    }

    /// Required single-choice steps hold the flow until a value is picked.
    pub fn can_advance(&self) -> bool {
        if self.is_on_review() {
            return false;
        }
        match self.current {
            EntryStep::BrewMethod => self.draft.brew_method.is_some(),
            EntryStep::RoastLevel => self.draft.roast_level.is_some(),
            EntryStep::ServingStyle => self.draft.serving_style.is_some(),
            _ => true,
        }
    }

    pub fn progress(&self) -> f64 {
        self.variant.progress_fraction(self.current).unwrap_or(0.0)
    }

    pub fn step_number(&self) -> usize {
        self.variant.step_number(self.current).unwrap_or(1)
    }

    pub fn total_steps(&self) -> usize {
        self.variant.total_steps()
    }

    pub fn view(&self) -> FlowView {
        FlowView {
            variant: self.variant,
            step: self.current,
            step_number: self.step_number(),
            total_steps: self.total_steps(),
            progress: self.progress(),
            question: display::step_question(self.current),
            encouragement: display::step_encouragement(self.current),
            can_go_back: self.can_go_back(),
            can_skip: self.can_skip(),
            can_advance: self.can_advance(),
            draft: self.draft.clone(),
            display: display::EntryDisplay::for_draft(&self.draft),
        }
    }

    /// Returns whether the flow moved.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            debug!("Entry flow held at {:?}", self.current);
            return false;
        }
        let Some(next) = self.variant.next_step(self.current) else {
            return false;
        };
        debug!("Entry flow {:?} -> {:?}", self.current, next);
        self.history.push(self.current);
        self.current = next;
        true
    }

    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                debug!("Entry flow back {:?} -> {:?}", self.current, previous);
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Moves past an optional step without filling it in.
    pub fn skip(&mut self) -> bool {
        if !self.can_skip() {
            warn!("Ignoring skip on required step {:?}", self.current);
            return false;
        }
        self.advance()
    }

    fn auto_advance_from(&mut self, step: EntryStep) {
        if self.auto_advance && self.current == step {
            self.advance();
        }
    }

    pub fn select_brew_method(&mut self, method: BrewMethod) {
        self.draft.brew_method = Some(method);
        self.auto_advance_from(EntryStep::BrewMethod);
    }

    pub fn select_roast_level(&mut self, level: RoastLevel) {
        self.draft.roast_level = Some(level);
        self.auto_advance_from(EntryStep::RoastLevel);
    }

    pub fn select_serving_style(&mut self, style: ServingStyle) {
        self.draft.serving_style = Some(style);
        self.auto_advance_from(EntryStep::ServingStyle);
    }

    pub fn select_rating(&mut self, rating: f64) {
        self.draft.set_rating(rating);
        self.auto_advance_from(EntryStep::Rating);
    }

    /// Builds the journal entry from the draft. Validation only; nothing is
    /// persisted here.
    pub fn commit(&self, compressor: &dyn PhotoCompressor) -> Result<CoffeeEntry, ValidationError> {
        let draft = &self.draft;
        let brew_method = draft.brew_method.ok_or(ValidationError::MissingBrewMethod)?;
        let roast_level = draft.roast_level.ok_or(ValidationError::MissingRoastLevel)?;

        let water_temperature = brew_method
            .uses_hot_water()
            .then(|| draft.water_temperature_celsius());
        let photo = draft.photo.as_deref().and_then(|raw| compressor.compress(raw));
        let (serving_style, customizations) = match self.variant {
            FlowVariant::Classic => (None, None),
            FlowVariant::Full => (
                draft.serving_style,
                draft.customizations.clone().filter(|c| c.has_any()),
            ),
        };

        Ok(CoffeeEntry {
            id: Uuid::new_v4().to_string(),
            coffee_name: draft.coffee_name.trim().to_string(),
            origin: draft.origin.trim().to_string(),
            roaster: draft.roaster.trim().to_string(),
            brew_method,
            roast_level,
            grind_size: draft.grind_size(),
            coffee_grams: draft.coffee_grams,
            water_grams: draft.water_grams,
            water_temperature,
            brew_time: draft.brew_time(),
            rating: draft.rating(),
            tasting_notes: draft.tasting_notes.clone(),
            personal_notes: draft.personal_notes.clone(),
            logged_at: draft.logged_at,
            is_favorite: false,
            serving_style,
            photo,
            customizations,
        })
    }
}
