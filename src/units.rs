//! Display-unit preferences. Celsius is the stored unit everywhere; Fahrenheit
//! only exists at the edges (sliders, labels, draft input).

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const DEFAULT_WATER_TEMP_C: f64 = 93.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Celsius value expressed in this unit.
    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }

    /// Value in this unit converted back to Celsius.
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => fahrenheit_to_celsius(value),
        }
    }

    /// Whole-degree label such as "93°C" or "199°F". Truncates like the slider label.
    pub fn display(&self, celsius: f64) -> String {
        format!("{}{}", self.from_celsius(celsius).trunc() as i64, self.symbol())
    }

    /// Water temperature slider bounds, 70–100 °C in either unit.
    pub fn slider_range(&self) -> RangeInclusive<f64> {
        match self {
            TemperatureUnit::Celsius => 70.0..=100.0,
            TemperatureUnit::Fahrenheit => 158.0..=212.0,
        }
    }

    pub fn default_water_temperature(&self) -> f64 {
        self.from_celsius(DEFAULT_WATER_TEMP_C)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AppearanceMode {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl AppearanceMode {
    /// Forced scheme, or `None` to follow the system.
    pub fn color_scheme(&self) -> Option<ColorScheme> {
        match self {
            AppearanceMode::Light => Some(ColorScheme::Light),
            AppearanceMode::Dark => Some(ColorScheme::Dark),
            AppearanceMode::System => None,
        }
    }
}
