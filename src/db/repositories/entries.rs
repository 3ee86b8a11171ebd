use anyhow::Result;
use rusqlite::{params, params_from_iter, types::Value, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{
        decode_customizations, decode_tags, encode_customizations, encode_tags,
        format_datetime, parse_brew_method, parse_datetime, parse_roast_level,
        parse_serving_style, to_u32,
    },
    models::{BrewTime, CoffeeEntry, EntryQuery},
};

const ENTRY_COLUMNS: &str = "id, coffee_name, origin, roaster, brew_method, roast_level, grind_size,
     coffee_grams, water_grams, water_temperature, brew_minutes, brew_seconds, rating,
     tasting_notes, personal_notes, logged_at, is_favorite, photo, serving_style, customizations";

fn row_to_entry(row: &Row) -> Result<CoffeeEntry> {
    let brew_method: String = row.get("brew_method")?;
    let roast_level: String = row.get("roast_level")?;
    let brew_minutes: i64 = row.get("brew_minutes")?;
    let brew_seconds: i64 = row.get("brew_seconds")?;
    let tasting_notes: String = row.get("tasting_notes")?;
    let logged_at: String = row.get("logged_at")?;
    let serving_style: Option<String> = row.get("serving_style")?;
    let customizations: Option<String> = row.get("customizations")?;

    Ok(CoffeeEntry {
        id: row.get("id")?,
        coffee_name: row.get("coffee_name")?,
        origin: row.get("origin")?,
        roaster: row.get("roaster")?,
        brew_method: parse_brew_method(&brew_method)?,
        roast_level: parse_roast_level(&roast_level)?,
        grind_size: row.get("grind_size")?,
        coffee_grams: row.get("coffee_grams")?,
        water_grams: row.get("water_grams")?,
        water_temperature: row.get("water_temperature")?,
        brew_time: BrewTime::new(
            to_u32(brew_minutes, "brew_minutes")?,
            to_u32(brew_seconds, "brew_seconds")?,
        ),
        rating: row.get("rating")?,
        tasting_notes: decode_tags(&tasting_notes)?,
        personal_notes: row.get("personal_notes")?,
        logged_at: parse_datetime(&logged_at, "logged_at")?,
        is_favorite: row.get("is_favorite")?,
        photo: row.get("photo")?,
        serving_style: parse_serving_style(serving_style)?,
        customizations: decode_customizations(customizations)?,
    })
}

/// Escapes LIKE wildcards so a search for "100%" matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

impl Database {
    pub async fn insert_entry(&self, entry: &CoffeeEntry) -> Result<()> {
        let record = entry.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO entries (id, coffee_name, origin, roaster, brew_method, roast_level, grind_size,
                     coffee_grams, water_grams, water_temperature, brew_minutes, brew_seconds, rating,
                     tasting_notes, personal_notes, logged_at, is_favorite, photo, serving_style, customizations)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
                params![
                    record.id,
                    record.coffee_name,
                    record.origin,
                    record.roaster,
                    record.brew_method.as_str(),
                    record.roast_level.as_str(),
                    record.grind_size,
                    record.coffee_grams,
                    record.water_grams,
                    record.water_temperature,
                    record.brew_time.minutes,
                    record.brew_time.seconds,
                    record.rating,
                    encode_tags(&record.tasting_notes)?,
                    record.personal_notes,
                    format_datetime(&record.logged_at),
                    record.is_favorite,
                    record.photo,
                    record.serving_style.map(|style| style.as_str()),
                    encode_customizations(record.customizations.as_ref())?,
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Overwrites every column of an existing entry. Returns `false` when no
    /// entry has that id.
    pub async fn update_entry(&self, entry: &CoffeeEntry) -> Result<bool> {
        let record = entry.clone();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE entries
                 SET coffee_name = ?1,
                     origin = ?2,
                     roaster = ?3,
                     brew_method = ?4,
                     roast_level = ?5,
                     grind_size = ?6,
                     coffee_grams = ?7,
                     water_grams = ?8,
                     water_temperature = ?9,
                     brew_minutes = ?10,
                     brew_seconds = ?11,
                     rating = ?12,
                     tasting_notes = ?13,
                     personal_notes = ?14,
                     logged_at = ?15,
                     is_favorite = ?16,
                     photo = ?17,
                     serving_style = ?18,
                     customizations = ?19
                 WHERE id = ?20",
                params![
                    record.coffee_name,
                    record.origin,
                    record.roaster,
                    record.brew_method.as_str(),
                    record.roast_level.as_str(),
                    record.grind_size,
                    record.coffee_grams,
                    record.water_grams,
                    record.water_temperature,
                    record.brew_time.minutes,
                    record.brew_time.seconds,
                    record.rating,
                    encode_tags(&record.tasting_notes)?,
                    record.personal_notes,
                    format_datetime(&record.logged_at),
                    record.is_favorite,
                    record.photo,
                    record.serving_style.map(|style| style.as_str()),
                    encode_customizations(record.customizations.as_ref())?,
                    record.id,
                ],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn delete_entry(&self, entry_id: &str) -> Result<bool> {
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM entries WHERE id = ?1", params![entry_id])?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn set_favorite(&self, entry_id: &str, is_favorite: bool) -> Result<bool> {
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE entries SET is_favorite = ?1 WHERE id = ?2",
                params![is_favorite, entry_id],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }

    pub async fn get_entry(&self, entry_id: &str) -> Result<Option<CoffeeEntry>> {
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1"))?;
            let mut rows = stmt.query(params![entry_id])?;
            let entry = match rows.next()? {
                Some(row) => Some(row_to_entry(row)?),
                None => None,
            };
            Ok(entry)
        })
        .await
    }

    /// Newest first. Search matches coffee name, origin or roaster without
    /// regard to ASCII case.
    pub async fn list_entries(&self, query: EntryQuery) -> Result<Vec<CoffeeEntry>> {
        self.execute(move |conn| {
            let mut clauses = Vec::new();
            let mut values: Vec<Value> = Vec::new();

            if let Some(term) = query.search.as_deref().map(str::trim) {
                if !term.is_empty() {
                    clauses.push(
                        "(coffee_name LIKE ? ESCAPE '\\' OR origin LIKE ? ESCAPE '\\' OR roaster LIKE ? ESCAPE '\\')",
                    );
                    let pattern = like_pattern(term);
                    for _ in 0..3 {
                        values.push(Value::Text(pattern.clone()));
                    }
                }
            }
            if let Some(method) = query.brew_method {
                clauses.push("brew_method = ?");
                values.push(Value::Text(method.as_str().to_string()));
            }
            if query.favorites_only {
                clauses.push("is_favorite = 1");
            }

            let where_clause = if clauses.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", clauses.join(" AND "))
            };
            let sql = format!(
                "SELECT {ENTRY_COLUMNS} FROM entries {where_clause}
                 ORDER BY logged_at DESC, rowid DESC"
            );

            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(values))?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(row_to_entry(row)?);
            }

            Ok(entries)
        })
        .await
    }

    /// Distinct, non-empty roaster names in ascending order for the roaster picker.
    pub async fn list_roasters(&self) -> Result<Vec<String>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT roaster FROM entries
                 WHERE TRIM(roaster) != ''
                 ORDER BY roaster ASC",
            )?;
            let roasters = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(roasters)
        })
        .await
    }

    pub async fn count_entries(&self) -> Result<u64> {
        self.execute(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
                .optional()?
                .unwrap_or(0);
            Ok(count.max(0) as u64)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::db::models::{
        BrewMethod, CoffeeCustomizations, IceAmount, RoastLevel, ServingStyle,
    };

    fn entry(id: &str, name: &str, roaster: &str, hour: u32) -> CoffeeEntry {
        CoffeeEntry {
            id: id.into(),
            coffee_name: name.into(),
            origin: String::new(),
            roaster: roaster.into(),
            brew_method: BrewMethod::PourOver,
            roast_level: RoastLevel::Light,
            grind_size: 5.0,
            coffee_grams: 18.0,
            water_grams: 300.0,
            water_temperature: Some(93.0),
            brew_time: BrewTime::new(3, 0),
            rating: 4.5,
            tasting_notes: vec!["Floral".into(), "Citrus".into()],
            personal_notes: String::new(),
            logged_at: Utc.with_ymd_and_hms(2025, 10, 26, hour, 0, 0).unwrap(),
            is_favorite: false,
            serving_style: None,
            photo: None,
            customizations: None,
        }
    }

    #[tokio::test]
    async fn insert_then_get_returns_the_same_entry() {
        let db = Database::in_memory().unwrap();
        let mut original = entry("a", "Ethiopian Yirgacheffe", "Blue Bottle", 8);
        original.serving_style = Some(ServingStyle::Iced);
        original.photo = Some(vec![0xFF, 0xD8, 0xFF]);
        original.customizations = Some(CoffeeCustomizations {
            spices: vec!["Cinnamon".into()],
            ice_amount: Some(IceAmount::Regular),
            ..Default::default()
        });

        db.insert_entry(&original).await.unwrap();
        let loaded = db.get_entry("a").await.unwrap().unwrap();
        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn missing_entry_is_none() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_entry("nope").await.unwrap().is_none());
        assert!(!db.delete_entry("nope").await.unwrap());
        assert!(!db.update_entry(&entry("nope", "", "", 1)).await.unwrap());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let db = Database::in_memory().unwrap();
        db.insert_entry(&entry("early", "A", "R", 6)).await.unwrap();
        db.insert_entry(&entry("late", "B", "R", 9)).await.unwrap();
        db.insert_entry(&entry("mid", "C", "R", 7)).await.unwrap();

        let ids: Vec<String> = db
            .list_entries(EntryQuery::default())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["late", "mid", "early"]);
    }

    #[tokio::test]
    async fn search_and_method_filter_combine() {
        let db = Database::in_memory().unwrap();
        db.insert_entry(&entry("1", "Kenya AA", "Onyx", 6)).await.unwrap();
        let mut press = entry("2", "Kenya Peaberry", "Stumptown", 7);
        press.brew_method = BrewMethod::FrenchPress;
        db.insert_entry(&press).await.unwrap();
        db.insert_entry(&entry("3", "Colombia", "onyx coffee lab", 8))
            .await
            .unwrap();

        let kenya = db
            .list_entries(EntryQuery {
                search: Some("kenya".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(kenya.len(), 2);

        let kenya_press = db
            .list_entries(EntryQuery {
                search: Some("KENYA".into()),
                brew_method: Some(BrewMethod::FrenchPress),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(kenya_press.len(), 1);
        assert_eq!(kenya_press[0].id, "2");

        let onyx = db
            .list_entries(EntryQuery {
                search: Some("Onyx".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(onyx.len(), 2);
    }

    #[tokio::test]
    async fn wildcards_in_search_are_literal() {
        let db = Database::in_memory().unwrap();
        db.insert_entry(&entry("1", "100% Arabica", "R", 6)).await.unwrap();
        db.insert_entry(&entry("2", "1000 Hills", "R", 7)).await.unwrap();

        let hits = db
            .list_entries(EntryQuery {
                search: Some("100%".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[tokio::test]
    async fn roasters_are_distinct_sorted_and_non_empty() {
        let db = Database::in_memory().unwrap();
        db.insert_entry(&entry("1", "A", "Onyx", 6)).await.unwrap();
        db.insert_entry(&entry("2", "B", "", 7)).await.unwrap();
        db.insert_entry(&entry("3", "C", "Blue Bottle", 8)).await.unwrap();
        db.insert_entry(&entry("4", "D", "Onyx", 9)).await.unwrap();

        assert_eq!(
            db.list_roasters().await.unwrap(),
            vec!["Blue Bottle".to_string(), "Onyx".to_string()]
        );
    }

    #[tokio::test]
    async fn favorites_filter_and_toggle() {
        let db = Database::in_memory().unwrap();
        db.insert_entry(&entry("1", "A", "R", 6)).await.unwrap();
        db.insert_entry(&entry("2", "B", "R", 7)).await.unwrap();
        assert!(db.set_favorite("2", true).await.unwrap());

        let favorites = db
            .list_entries(EntryQuery {
                favorites_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "2");
        assert_eq!(db.count_entries().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_delete_removes() {
        let db = Database::in_memory().unwrap();
        let mut record = entry("1", "A", "R", 6);
        db.insert_entry(&record).await.unwrap();

        record.rating = 2.0;
        record.water_temperature = None;
        record.brew_method = BrewMethod::ColdBrew;
        assert!(db.update_entry(&record).await.unwrap());
        assert_eq!(db.get_entry("1").await.unwrap().unwrap(), record);

        assert!(db.delete_entry("1").await.unwrap());
        assert_eq!(db.count_entries().await.unwrap(), 0);
    }
}
