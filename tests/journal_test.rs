//! Journal end to end against an on-disk store.

use std::io::Cursor;
use std::sync::Arc;

use coffeemio_lib::{
    db::{models::BrewMethod, models::RoastLevel, Database, EntryQuery},
    flow::{EntryFlow, EntryStep, FlowVariant},
    journal::Journal,
    photo::{JpegCompressor, TARGET_BYTES},
    units::TemperatureUnit,
};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use tempfile::tempdir;

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| Rgb([(x % 200) as u8, (y % 200) as u8, 90]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

fn log_one(flow: &mut EntryFlow, name: &str, roaster: &str, method: BrewMethod) {
    flow.draft_mut().coffee_name = name.into();
    assert!(flow.advance());
    flow.draft_mut().roaster = roaster.into();
    assert!(flow.advance());
    flow.select_brew_method(method);
    flow.select_roast_level(RoastLevel::Medium);
    while !flow.is_on_review() {
        assert!(flow.advance());
    }
}

#[tokio::test]
async fn entries_survive_a_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("coffeemio.sqlite3");

    let saved = {
        let journal = Journal::new(
            Database::new(db_path.clone()).expect("open db"),
            Arc::new(JpegCompressor),
        );
        let mut flow = EntryFlow::new(FlowVariant::Classic, TemperatureUnit::Fahrenheit);
        log_one(&mut flow, "Ethiopian Yirgacheffe", "Blue Bottle", BrewMethod::PourOver);
        flow.draft_mut().photo = Some(png(1600, 900));
        journal.save_flow(&flow).await.expect("save")
    };

    let journal = Journal::new(Database::new(db_path).expect("reopen db"), Arc::new(JpegCompressor));
    let loaded = journal.get(&saved.id).await.expect("load");
    assert_eq!(loaded, saved);
    assert!((loaded.water_temperature.expect("hot brew") - 93.0).abs() < 1e-9);

    let photo = loaded.photo.expect("photo kept");
    assert!(photo.len() <= TARGET_BYTES);
    let decoded = image::load_from_memory(&photo).expect("decode jpeg");
    assert_eq!((decoded.width(), decoded.height()), (1200, 675));
}

#[tokio::test]
async fn home_list_search_and_filter() {
    let dir = tempdir().expect("Failed to create temp dir");
    let journal = Journal::new(
        Database::new(dir.path().join("journal.sqlite3")).expect("open db"),
        Arc::new(JpegCompressor),
    );

    for (name, roaster, method) in [
        ("Ethiopian Yirgacheffe", "Blue Bottle", BrewMethod::PourOver),
        ("Colombia Huila", "Onyx", BrewMethod::Chemex),
        ("House Blend", "blue bottle", BrewMethod::FrenchPress),
    ] {
        let mut flow = EntryFlow::new(FlowVariant::Full, TemperatureUnit::Celsius);
        flow.draft_mut().coffee_name = name.into();
        flow.draft_mut().roaster = roaster.into();
        flow.draft_mut().brew_method = Some(method);
        flow.draft_mut().roast_level = Some(RoastLevel::Light);
        journal.save_flow(&flow).await.expect("save");
    }

    let by_roaster = journal
        .summaries(EntryQuery {
            search: Some("BLUE".into()),
            ..Default::default()
        })
        .await
        .expect("search");
    assert_eq!(by_roaster.len(), 2);

    let chemex_only = journal
        .summaries(EntryQuery {
            brew_method: Some(BrewMethod::Chemex),
            ..Default::default()
        })
        .await
        .expect("filter");
    assert_eq!(chemex_only.len(), 1);
    assert_eq!(chemex_only[0].coffee_name, "Colombia Huila");

    assert_eq!(
        journal.roasters().await.expect("roasters"),
        vec!["Blue Bottle", "Onyx", "blue bottle"]
    );
}

#[test]
fn full_flow_walks_fifteen_steps() {
    let mut flow = EntryFlow::new(FlowVariant::Full, TemperatureUnit::Celsius);
    let mut visited = vec![flow.current_step()];
    flow.draft_mut().brew_method = Some(BrewMethod::Espresso);
    flow.draft_mut().roast_level = Some(RoastLevel::Dark);
    flow.draft_mut().serving_style = Some(coffeemio_lib::db::models::ServingStyle::Iced);
    while flow.advance() {
        visited.push(flow.current_step());
    }
    assert_eq!(visited.len(), 15);
    assert_eq!(visited.last(), Some(&EntryStep::Review));
}
