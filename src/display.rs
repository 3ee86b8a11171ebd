//! Labels, icons and copy for enum values and entry steps.

use serde::Serialize;

use crate::{
    db::models::{BrewMethod, BrewTime, CoffeeEntry, RoastLevel, ServingStyle},
    flow::{EntryDraft, EntryStep},
    guides::Difficulty,
};

pub const COMMON_TASTING_NOTES: [&str; 20] = [
    "Chocolate", "Fruity", "Nutty", "Floral", "Caramel", "Citrus", "Berry", "Honey", "Spicy",
    "Earthy", "Sweet", "Bright", "Smooth", "Bold", "Balanced", "Creamy", "Crisp", "Complex",
    "Clean", "Juicy",
];

pub const COMMON_SPICES: [&str; 5] = [
    "Cinnamon",
    "Nutmeg",
    "Cardamom",
    "Cocoa Powder",
    "Vanilla Extract",
];

pub fn brew_method_icon(method: BrewMethod) -> &'static str {
    match method {
        BrewMethod::Espresso => "cup.and.saucer.fill",
        BrewMethod::PourOver => "drop.fill",
        BrewMethod::FrenchPress => "cylinder.fill",
        BrewMethod::AeroPress => "chart.line.uptrend.xyaxis",
        BrewMethod::ColdBrew => "snowflake",
        BrewMethod::MokaPot => "flame.fill",
        BrewMethod::Drip => "drop.triangle.fill",
        BrewMethod::Siphon => "flask.fill",
        BrewMethod::Chemex => "triangle.fill",
    }
}

/// Named colour asset for the roast badge.
pub fn roast_color(level: RoastLevel) -> &'static str {
    match level {
        RoastLevel::Light => "RoastLight",
        RoastLevel::Medium => "RoastMedium",
        RoastLevel::MediumDark => "RoastMediumDark",
        RoastLevel::Dark => "RoastDark",
    }
}

pub fn serving_style_label(style: ServingStyle) -> &'static str {
    match style {
        ServingStyle::Hot => "Hot",
        ServingStyle::Iced => "Iced",
    }
}

pub fn serving_style_icon(style: ServingStyle) -> &'static str {
    match style {
        ServingStyle::Hot => "flame.fill",
        ServingStyle::Iced => "snowflake",
    }
}

pub fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Easy",
        Difficulty::Medium => "Medium",
        Difficulty::Hard => "Hard",
    }
}

pub fn difficulty_color(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "green",
        Difficulty::Medium => "orange",
        Difficulty::Hard => "red",
    }
}

pub fn grind_size_label(grind: f64) -> &'static str {
    match grind {
        g if (1.0..3.0).contains(&g) => "Extra Fine",
        g if (3.0..5.0).contains(&g) => "Fine",
        g if (5.0..7.0).contains(&g) => "Medium",
        g if (7.0..9.0).contains(&g) => "Coarse",
        _ => "Extra Coarse",
    }
}

/// Shown under the rating stars.
pub fn rating_message(rating: f64) -> &'static str {
    match rating {
        r if r >= 5.0 => "Outstanding! ✨",
        r if r >= 4.0 => "Excellent!",
        r if r >= 3.0 => "Great choice!",
        r if r >= 2.0 => "Not bad!",
        _ => "Thanks for logging!",
    }
}

/// "1:16.7". Empty when there is no coffee to divide by.
pub fn brew_ratio_string(coffee_grams: f64, water_grams: f64) -> String {
    if coffee_grams <= 0.0 {
        return String::new();
    }
    format!("1:{:.1}", water_grams / coffee_grams)
}

/// "3m 30s", or "45s" under a minute.
pub fn total_brew_time(time: BrewTime) -> String {
    if time.minutes > 0 {
        format!("{}m {}s", time.minutes, time.seconds)
    } else {
        format!("{}s", time.seconds)
    }
}

/// Presentation strings for an entry card or the review step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDisplay {
    pub brew_method_icon: Option<&'static str>,
    pub roast_color: Option<&'static str>,
    pub serving_style: Option<&'static str>,
    pub serving_style_icon: Option<&'static str>,
    pub grind_label: &'static str,
    pub rating_message: &'static str,
    pub brew_ratio: String,
    pub brew_time: String,
}

impl EntryDisplay {
    #[allow(clippy::too_many_arguments)]
    fn build(
        method: Option<BrewMethod>,
        roast: Option<RoastLevel>,
        style: Option<ServingStyle>,
        grind: f64,
        rating: f64,
        coffee_grams: f64,
        water_grams: f64,
        time: BrewTime,
    ) -> Self {
        Self {
            brew_method_icon: method.map(brew_method_icon),
            roast_color: roast.map(roast_color),
            serving_style: style.map(serving_style_label),
            serving_style_icon: style.map(serving_style_icon),
            grind_label: grind_size_label(grind),
            rating_message: rating_message(rating),
            brew_ratio: brew_ratio_string(coffee_grams, water_grams),
            brew_time: total_brew_time(time),
        }
    }

    pub fn for_entry(entry: &CoffeeEntry) -> Self {
        Self::build(
            Some(entry.brew_method),
            Some(entry.roast_level),
            entry.serving_style,
            entry.grind_size,
            entry.rating,
            entry.coffee_grams,
            entry.water_grams,
            entry.brew_time,
        )
    }

    pub fn for_draft(draft: &EntryDraft) -> Self {
        Self::build(
            draft.brew_method,
            draft.roast_level,
            draft.serving_style,
            draft.grind_size(),
            draft.rating(),
            draft.coffee_grams,
            draft.water_grams,
            draft.brew_time(),
        )
    }
}

pub fn step_question(step: EntryStep) -> &'static str {
    match step {
        EntryStep::CoffeeName => "What coffee are you brewing today?",
        EntryStep::Roaster => "Who roasted it?",
        EntryStep::BrewMethod => "How are you brewing it?",
        EntryStep::ServingStyle => "Hot or iced?",
        EntryStep::RoastLevel => "What's the roast level?",
        EntryStep::GrindSize => "How fine did you grind it?",
        EntryStep::BrewRatio => "What's your brew ratio?",
        EntryStep::WaterTemp => "How hot is the water?",
        EntryStep::BrewTime => "How long will it brew?",
        EntryStep::Customizations => "How do you take it?",
        EntryStep::Rating => "How was it?",
        EntryStep::TastingNotes => "What flavors did you taste?",
        EntryStep::PersonalNotes => "Any notes to remember?",
        EntryStep::Photo => "Want to add a photo?",
        EntryStep::Review => "Looking good! Ready to save?",
    }
}

/// Little cheer after answering a step, if any.
pub fn step_encouragement(step: EntryStep) -> Option<&'static str> {
    match step {
        EntryStep::Rating => Some("Excellent!"),
        EntryStep::BrewMethod => Some("Great choice!"),
        EntryStep::Review => Some("Coffee logged! ☕️"),
        _ => None,
    }
}
