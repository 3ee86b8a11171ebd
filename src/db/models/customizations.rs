//! Drink customization models (milk, sweeteners, syrups, spices, ice).
//!
//! Stored as a single JSON document in `entries.customizations`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeCustomizations {
    pub milk: Option<MilkCustomization>,
    #[serde(default)]
    pub sweeteners: Vec<Sweetener>,
    #[serde(default)]
    pub flavors: Vec<Flavor>,
    #[serde(default)]
    pub spices: Vec<String>,
    #[serde(default)]
    pub has_whipped_cream: bool,
    pub ice_amount: Option<IceAmount>,
}

impl CoffeeCustomizations {
    pub fn has_any(&self) -> bool {
        self.milk.is_some()
            || !self.sweeteners.is_empty()
            || !self.flavors.is_empty()
            || !self.spices.is_empty()
            || self.has_whipped_cream
            || self.ice_amount.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MilkCustomization {
    pub milk_type: MilkType,
    /// Free text such as "Splash", "1:1" or "2oz".
    pub amount: String,
    pub temperature: Option<MilkTemperature>,
    pub foam_level: Option<FoamLevel>,
}

impl Default for MilkCustomization {
    fn default() -> Self {
        Self {
            milk_type: MilkType::Whole,
            amount: "Splash".into(),
            temperature: None,
            foam_level: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MilkType {
    Whole,
    TwoPercent,
    Oat,
    Almond,
    Soy,
    Coconut,
    HeavyCream,
    HalfAndHalf,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MilkTemperature {
    Cold,
    RoomTemp,
    Steamed,
    ExtraHot,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FoamLevel {
    NoFoam,
    Light,
    Medium,
    Heavy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sweetener {
    pub sweetener_type: SweetenerType,
    /// e.g. "1 tsp", "2 pumps"
    pub amount: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SweetenerType {
    Sugar,
    Honey,
    Agave,
    Stevia,
    BrownSugar,
    MapleSyrup,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Flavor {
    pub flavor_type: FlavorType,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FlavorType {
    Vanilla,
    Caramel,
    Hazelnut,
    Mocha,
    Lavender,
    Cardamom,
    Seasonal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum IceAmount {
    Light,
    Regular,
    Extra,
}
