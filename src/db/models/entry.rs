//! Journal entry data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::customizations::CoffeeCustomizations;
use crate::display::EntryDisplay;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BrewMethod {
    Espresso,
    PourOver,
    FrenchPress,
    AeroPress,
    ColdBrew,
    MokaPot,
    Drip,
    Siphon,
    Chemex,
}

impl BrewMethod {
    pub const ALL: [BrewMethod; 9] = [
        BrewMethod::Espresso,
        BrewMethod::PourOver,
        BrewMethod::FrenchPress,
        BrewMethod::AeroPress,
        BrewMethod::ColdBrew,
        BrewMethod::MokaPot,
        BrewMethod::Drip,
        BrewMethod::Siphon,
        BrewMethod::Chemex,
    ];

    /// Stable tag stored in the `entries.brew_method` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            BrewMethod::Espresso => "espresso",
            BrewMethod::PourOver => "pour_over",
            BrewMethod::FrenchPress => "french_press",
            BrewMethod::AeroPress => "aeropress",
            BrewMethod::ColdBrew => "cold_brew",
            BrewMethod::MokaPot => "moka_pot",
            BrewMethod::Drip => "drip",
            BrewMethod::Siphon => "siphon",
            BrewMethod::Chemex => "chemex",
        }
    }

    pub fn from_tag(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.as_str() == value)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BrewMethod::Espresso => "Espresso",
            BrewMethod::PourOver => "Pour Over",
            BrewMethod::FrenchPress => "French Press",
            BrewMethod::AeroPress => "AeroPress",
            BrewMethod::ColdBrew => "Cold Brew",
            BrewMethod::MokaPot => "Moka Pot",
            BrewMethod::Drip => "Drip",
            BrewMethod::Siphon => "Siphon",
            BrewMethod::Chemex => "Chemex",
        }
    }

    /// Cold brew steeps at room temperature, so entries carry no water temperature.
    pub fn uses_hot_water(&self) -> bool {
        !matches!(self, BrewMethod::ColdBrew)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum RoastLevel {
    Light,
    Medium,
    MediumDark,
    Dark,
}

impl RoastLevel {
    pub const ALL: [RoastLevel; 4] = [
        RoastLevel::Light,
        RoastLevel::Medium,
        RoastLevel::MediumDark,
        RoastLevel::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoastLevel::Light => "light",
            RoastLevel::Medium => "medium",
            RoastLevel::MediumDark => "medium_dark",
            RoastLevel::Dark => "dark",
        }
    }

    pub fn from_tag(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoastLevel::Light => "Light",
            RoastLevel::Medium => "Medium",
            RoastLevel::MediumDark => "Medium-Dark",
            RoastLevel::Dark => "Dark",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ServingStyle {
    Hot,
    Iced,
}

impl ServingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServingStyle::Hot => "hot",
            ServingStyle::Iced => "iced",
        }
    }

    pub fn from_tag(value: &str) -> Option<Self> {
        match value {
            "hot" => Some(ServingStyle::Hot),
            "iced" => Some(ServingStyle::Iced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BrewTime {
    pub minutes: u32,
    pub seconds: u32,
}

impl BrewTime {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    pub fn total_seconds(&self) -> u32 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeEntry {
    pub id: String,
    pub coffee_name: String,
    pub origin: String,
    pub roaster: String,
    pub brew_method: BrewMethod,
    pub roast_level: RoastLevel,
    /// 1.0 (fine) to 10.0 (coarse).
    pub grind_size: f64,
    pub coffee_grams: f64,
    pub water_grams: f64,
    /// Celsius. `None` for cold brew.
    pub water_temperature: Option<f64>,
    pub brew_time: BrewTime,
    /// 1.0 to 5.0 in half steps.
    pub rating: f64,
    pub tasting_notes: Vec<String>,
    pub personal_notes: String,
    pub logged_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub serving_style: Option<ServingStyle>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub photo: Option<Vec<u8>>,
    pub customizations: Option<CoffeeCustomizations>,
}

impl CoffeeEntry {
    /// Water to coffee ratio. `None` when no coffee was recorded.
    pub fn brew_ratio(&self) -> Option<f64> {
        if self.coffee_grams > 0.0 {
            Some(self.water_grams / self.coffee_grams)
        } else {
            None
        }
    }
}

/// Row shape used by list views; leaves the photo blob behind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub id: String,
    pub coffee_name: String,
    pub roaster: String,
    pub brew_method: BrewMethod,
    pub roast_level: RoastLevel,
    pub rating: f64,
    pub logged_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub has_photo: bool,
    pub display: EntryDisplay,
}

impl From<&CoffeeEntry> for EntrySummary {
    fn from(entry: &CoffeeEntry) -> Self {
        Self {
            id: entry.id.clone(),
            coffee_name: entry.coffee_name.clone(),
            roaster: entry.roaster.clone(),
            brew_method: entry.brew_method,
            roast_level: entry.roast_level,
            rating: entry.rating,
            logged_at: entry.logged_at,
            is_favorite: entry.is_favorite,
            has_photo: entry.photo.is_some(),
            display: EntryDisplay::for_entry(entry),
        }
    }
}

/// Filters for the home list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryQuery {
    pub search: Option<String>,
    pub brew_method: Option<BrewMethod>,
    pub favorites_only: bool,
}
