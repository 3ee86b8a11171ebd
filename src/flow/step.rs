use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum EntryStep {
    CoffeeName,
    Roaster,
    BrewMethod,
    ServingStyle,
    RoastLevel,
    GrindSize,
    BrewRatio,
    WaterTemp,
    BrewTime,
    Customizations,
    Rating,
    TastingNotes,
    PersonalNotes,
    Photo,
    Review,
}

const CLASSIC_STEPS: [EntryStep; 13] = [
    EntryStep::CoffeeName,
    EntryStep::Roaster,
    EntryStep::BrewMethod,
    EntryStep::RoastLevel,
    EntryStep::GrindSize,
    EntryStep::BrewRatio,
    EntryStep::WaterTemp,
    EntryStep::BrewTime,
    EntryStep::Rating,
    EntryStep::TastingNotes,
    EntryStep::PersonalNotes,
    EntryStep::Photo,
    EntryStep::Review,
];

const FULL_STEPS: [EntryStep; 15] = [
    EntryStep::CoffeeName,
    EntryStep::Roaster,
    EntryStep::BrewMethod,
    EntryStep::ServingStyle,
    EntryStep::RoastLevel,
    EntryStep::GrindSize,
    EntryStep::BrewRatio,
    EntryStep::WaterTemp,
    EntryStep::BrewTime,
    EntryStep::Customizations,
    EntryStep::Rating,
    EntryStep::TastingNotes,
    EntryStep::PersonalNotes,
    EntryStep::Photo,
    EntryStep::Review,
];

/// Which step sequence a flow walks. `Full` adds serving style and drink
/// customizations to the classic sequence.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FlowVariant {
    #[default]
    Classic,
    Full,
}

impl FlowVariant {
    pub fn steps(&self) -> &'static [EntryStep] {
        match self {
            FlowVariant::Classic => &CLASSIC_STEPS,
            FlowVariant::Full => &FULL_STEPS,
        }
    }

    pub fn total_steps(&self) -> usize {
        self.steps().len()
    }

    pub fn first_step(&self) -> EntryStep {
        self.steps()[0]
    }

    pub fn ordinal(&self, step: EntryStep) -> Option<usize> {
        self.steps().iter().position(|candidate| *candidate == step)
    }

    pub fn next_step(&self, step: EntryStep) -> Option<EntryStep> {
        let ordinal = self.ordinal(step)?;
        self.steps().get(ordinal + 1).copied()
    }

    pub fn is_terminal(&self, step: EntryStep) -> bool {
        self.steps().last() == Some(&step)
    }

    pub fn is_step_optional(&self, step: EntryStep) -> bool {
        match self {
            FlowVariant::Classic => {
                matches!(step, EntryStep::PersonalNotes | EntryStep::Photo)
            }
            FlowVariant::Full => matches!(
                step,
                EntryStep::Customizations | EntryStep::PersonalNotes | EntryStep::Photo
            ),
        }
    }

    /// `(ordinal + 1) / total`; `None` for a step this variant doesn't have.
    pub fn progress_fraction(&self, step: EntryStep) -> Option<f64> {
        let ordinal = self.ordinal(step)?;
        Some((ordinal + 1) as f64 / self.total_steps() as f64)
    }

    /// 1-based position shown as "Step N of M".
    pub fn step_number(&self, step: EntryStep) -> Option<usize> {
        self.ordinal(step).map(|ordinal| ordinal + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_have_expected_lengths() {
        assert_eq!(FlowVariant::Classic.total_steps(), 13);
        assert_eq!(FlowVariant::Full.total_steps(), 15);
        for variant in [FlowVariant::Classic, FlowVariant::Full] {
            assert_eq!(variant.first_step(), EntryStep::CoffeeName);
            assert!(variant.is_terminal(EntryStep::Review));
        }
    }

    #[test]
    fn classic_has_no_serving_or_customization_step() {
        assert_eq!(FlowVariant::Classic.ordinal(EntryStep::ServingStyle), None);
        assert_eq!(FlowVariant::Classic.ordinal(EntryStep::Customizations), None);
        assert_eq!(
            FlowVariant::Classic.next_step(EntryStep::BrewMethod),
            Some(EntryStep::RoastLevel)
        );
        assert_eq!(
            FlowVariant::Full.next_step(EntryStep::BrewMethod),
            Some(EntryStep::ServingStyle)
        );
    }

    #[test]
    fn progress_is_strictly_increasing_and_ends_at_one() {
        for variant in [FlowVariant::Classic, FlowVariant::Full] {
            let total = variant.total_steps() as f64;
            let fractions: Vec<f64> = variant
                .steps()
                .iter()
                .map(|step| variant.progress_fraction(*step).unwrap())
                .collect();
            assert_eq!(fractions[0], 1.0 / total);
            assert_eq!(*fractions.last().unwrap(), 1.0);
            assert!(fractions.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn optional_steps_per_variant() {
        let optional = |variant: FlowVariant| -> Vec<EntryStep> {
            variant
                .steps()
                .iter()
                .copied()
                .filter(|step| variant.is_step_optional(*step))
                .collect()
        };
        assert_eq!(
            optional(FlowVariant::Classic),
            vec![EntryStep::PersonalNotes, EntryStep::Photo]
        );
        assert_eq!(
            optional(FlowVariant::Full),
            vec![
                EntryStep::Customizations,
                EntryStep::PersonalNotes,
                EntryStep::Photo
            ]
        );
    }

    #[test]
    fn step_numbers_are_one_based() {
        assert_eq!(FlowVariant::Classic.step_number(EntryStep::CoffeeName), Some(1));
        assert_eq!(FlowVariant::Classic.step_number(EntryStep::Review), Some(13));
        assert_eq!(FlowVariant::Full.step_number(EntryStep::RoastLevel), Some(5));
    }
}
