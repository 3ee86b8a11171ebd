//! Saving, editing and browsing journal entries on top of the store.

use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        models::{BrewMethod, BrewTime, CoffeeCustomizations, RoastLevel, ServingStyle},
        CoffeeEntry, Database, EntryQuery, EntrySummary,
    },
    error::JournalError,
    flow::{
        draft::{half_step, GRIND_RANGE, MAX_BREW_MINUTES, RATING_RANGE},
        EntryFlow,
    },
    photo::PhotoCompressor,
    units::TemperatureUnit,
};

/// What to do with an entry's photo when saving an edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "bytes", rename_all = "camelCase")]
pub enum PhotoEdit {
    #[default]
    Keep,
    Remove,
    /// Raw picked bytes; compressed before storing.
    Replace(Vec<u8>),
}

/// Every field the edit form can change. Temperatures are Celsius.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEdit {
    pub coffee_name: String,
    pub origin: String,
    pub roaster: String,
    pub brew_method: BrewMethod,
    pub roast_level: RoastLevel,
    pub grind_size: f64,
    pub coffee_grams: f64,
    pub water_grams: f64,
    pub water_temperature: Option<f64>,
    pub brew_time: BrewTime,
    pub rating: f64,
    pub tasting_notes: Vec<String>,
    pub personal_notes: String,
    pub serving_style: Option<ServingStyle>,
    pub customizations: Option<CoffeeCustomizations>,
    #[serde(default)]
    pub photo: PhotoEdit,
}

impl EntryEdit {
    /// Pre-fills the form from a saved entry.
    pub fn from_entry(entry: &CoffeeEntry) -> Self {
        Self {
            coffee_name: entry.coffee_name.clone(),
            origin: entry.origin.clone(),
            roaster: entry.roaster.clone(),
            brew_method: entry.brew_method,
            roast_level: entry.roast_level,
            grind_size: entry.grind_size,
            coffee_grams: entry.coffee_grams,
            water_grams: entry.water_grams,
            water_temperature: entry.water_temperature,
            brew_time: entry.brew_time,
            rating: entry.rating,
            tasting_notes: entry.tasting_notes.clone(),
            personal_notes: entry.personal_notes.clone(),
            serving_style: entry.serving_style,
            customizations: entry.customizations.clone(),
            photo: PhotoEdit::Keep,
        }
    }

    fn apply(self, entry: &mut CoffeeEntry, compressor: &dyn PhotoCompressor) {
        entry.coffee_name = self.coffee_name.trim().to_string();
        entry.origin = self.origin.trim().to_string();
        entry.roaster = self.roaster.trim().to_string();
        entry.brew_method = self.brew_method;
        entry.roast_level = self.roast_level;
        entry.grind_size = half_step(self.grind_size, GRIND_RANGE);
        entry.coffee_grams = self.coffee_grams.max(0.0);
        entry.water_grams = self.water_grams.max(0.0);
        let range = TemperatureUnit::Celsius.slider_range();
        entry.water_temperature = self
            .water_temperature
            .filter(|_| self.brew_method.uses_hot_water())
            .map(|value| value.clamp(*range.start(), *range.end()));
        entry.brew_time = BrewTime::new(
            self.brew_time.minutes.min(MAX_BREW_MINUTES),
            self.brew_time.seconds.min(59),
        );
        entry.rating = half_step(self.rating, RATING_RANGE);
        entry.tasting_notes = self.tasting_notes;
        entry.personal_notes = self.personal_notes;
        entry.serving_style = self.serving_style;
        entry.customizations = self.customizations.filter(|c| c.has_any());

        // Untouched photos are stored as-is; only a new pick is recompressed.
        match self.photo {
            PhotoEdit::Keep => {}
            PhotoEdit::Remove => entry.photo = None,
            PhotoEdit::Replace(raw) => entry.photo = compressor.compress(&raw),
        }
    }
}

/// The journal as the app sees it: a store plus the photo compressor that
/// every write goes through.
#[derive(Clone)]
pub struct Journal {
    db: Database,
    compressor: Arc<dyn PhotoCompressor>,
}

impl Journal {
    pub fn new(db: Database, compressor: Arc<dyn PhotoCompressor>) -> Self {
        Self { db, compressor }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Commits the flow's draft and persists it.
    pub async fn save_flow(&self, flow: &EntryFlow) -> Result<CoffeeEntry, JournalError> {
        let entry = flow.commit(self.compressor.as_ref())?;
        self.db.insert_entry(&entry).await?;
        info!(
            "Logged {} ({})",
            entry.coffee_name,
            entry.brew_method.display_name()
        );
        Ok(entry)
    }

    pub async fn get(&self, entry_id: &str) -> Result<CoffeeEntry, JournalError> {
        self.db
            .get_entry(entry_id)
            .await?
            .ok_or_else(|| JournalError::NotFound(entry_id.to_string()))
    }

    pub async fn entries(&self, query: EntryQuery) -> Result<Vec<CoffeeEntry>, JournalError> {
        Ok(self.db.list_entries(query).await?)
    }

    pub async fn summaries(&self, query: EntryQuery) -> Result<Vec<EntrySummary>, JournalError> {
        let entries = self.db.list_entries(query).await?;
        Ok(entries.iter().map(EntrySummary::from).collect())
    }

    pub async fn roasters(&self) -> Result<Vec<String>, JournalError> {
        Ok(self.db.list_roasters().await?)
    }

    pub async fn count(&self) -> Result<u64, JournalError> {
        Ok(self.db.count_entries().await?)
    }

    pub async fn edit(&self, entry_id: &str, edit: EntryEdit) -> Result<CoffeeEntry, JournalError> {
        let mut entry = self.get(entry_id).await?;
        edit.apply(&mut entry, self.compressor.as_ref());
        if !self.db.update_entry(&entry).await? {
            return Err(JournalError::NotFound(entry_id.to_string()));
        }
        Ok(entry)
    }

    /// Flips the favorite flag and returns the new value.
    pub async fn toggle_favorite(&self, entry_id: &str) -> Result<bool, JournalError> {
        let entry = self.get(entry_id).await?;
        let next = !entry.is_favorite;
        if !self.db.set_favorite(entry_id, next).await? {
            return Err(JournalError::NotFound(entry_id.to_string()));
        }
        Ok(next)
    }

    pub async fn delete(&self, entry_id: &str) -> Result<(), JournalError> {
        if !self.db.delete_entry(entry_id).await? {
            return Err(JournalError::NotFound(entry_id.to_string()));
        }
        info!("Deleted entry {entry_id}");
        Ok(())
    }
}
