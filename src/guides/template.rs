//! Instruction text with named quantity slots.
//!
//! Guides are authored as `"Add {coffee}g of ground coffee"`. The text is
//! split once into literal and slot segments and rendered in a single pass,
//! so two quantities that happen to share a gram value can never be
//! substituted into each other's position.

use serde::{Serialize, Serializer};

use crate::error::GuideError;

use super::scaler::ScaledRecipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Quantity {
    Coffee,
    Water,
    Bloom,
}

impl Quantity {
    fn from_slot_name(name: &str) -> Option<Self> {
        match name {
            "coffee" => Some(Quantity::Coffee),
            "water" => Some(Quantity::Water),
            "bloom" => Some(Quantity::Bloom),
            _ => None,
        }
    }

    pub fn grams(&self, recipe: &ScaledRecipe) -> u32 {
        match self {
            Quantity::Coffee => recipe.coffee_grams,
            Quantity::Water => recipe.water_grams,
            Quantity::Bloom => recipe.bloom_grams,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Quantity),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl InstructionTemplate {
    pub fn parse(source: &str) -> Result<Self, GuideError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after_open = &rest[open + 1..];
            let close = after_open.find('}').ok_or(GuideError::UnterminatedSlot)?;
            let name = &after_open[..close];
            let quantity = Quantity::from_slot_name(name)
                .ok_or_else(|| GuideError::UnknownSlot(name.to_string()))?;
            segments.push(Segment::Slot(quantity));
            rest = &after_open[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Built-in guide text. A malformed template is rendered verbatim rather
    /// than taking the whole guide library down; the library tests parse every
    /// template strictly.
    pub(crate) fn authored(source: &str) -> Self {
        match Self::parse(source) {
            Ok(template) => template,
            Err(err) => {
                log::error!("Malformed guide instruction ({err}): {source}");
                Self {
                    source: source.to_string(),
                    segments: vec![Segment::Literal(source.to_string())],
                }
            }
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn slots(&self) -> impl Iterator<Item = Quantity> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(quantity) => Some(*quantity),
            Segment::Literal(_) => None,
        })
    }

    pub fn render(&self, recipe: &ScaledRecipe) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(quantity) => out.push_str(&quantity.grams(recipe).to_string()),
            }
        }
        out
    }
}

impl Serialize for InstructionTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}
