use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::db::models::{BrewMethod, CoffeeCustomizations, RoastLevel, ServingStyle};

pub fn to_u32(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{field} contains out-of-range value {value}"))
}

/// Fixed-width UTC form so `ORDER BY` on the text column sorts chronologically.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_brew_method(value: &str) -> Result<BrewMethod> {
    BrewMethod::from_tag(value).ok_or_else(|| anyhow!("unknown brew method {value}"))
}

pub fn parse_roast_level(value: &str) -> Result<RoastLevel> {
    RoastLevel::from_tag(value).ok_or_else(|| anyhow!("unknown roast level {value}"))
}

pub fn parse_serving_style(value: Option<String>) -> Result<Option<ServingStyle>> {
    match value {
        Some(raw) => ServingStyle::from_tag(&raw)
            .map(Some)
            .ok_or_else(|| anyhow!("unknown serving style {raw}")),
        None => Ok(None),
    }
}

pub fn encode_tags(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags).context("failed to encode tasting notes")
}

pub fn decode_tags(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).context("failed to decode tasting notes")
}

pub fn encode_customizations(value: Option<&CoffeeCustomizations>) -> Result<Option<String>> {
    value
        .map(|custom| serde_json::to_string(custom).context("failed to encode customizations"))
        .transpose()
}

pub fn decode_customizations(raw: Option<String>) -> Result<Option<CoffeeCustomizations>> {
    raw.map(|json| serde_json::from_str(&json).context("failed to decode customizations"))
        .transpose()
}
