pub mod db;
pub mod display;
pub mod error;
pub mod flow;
pub mod guides;
pub mod journal;
pub mod photo;
pub mod settings;
pub mod timer;
pub mod units;

#[cfg(feature = "desktop")]
mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;

use db::Database;
use journal::Journal;
use photo::JpegCompressor;
use settings::SettingsStore;

pub const DATA_DIR_ENV: &str = "COFFEEMIO_DATA_DIR";
pub const DATABASE_FILE: &str = "coffeemio.sqlite3";
pub const SETTINGS_FILE: &str = "settings.json";

/// Logs at info by default; `RUST_LOG` overrides.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// `COFFEEMIO_DATA_DIR` when set, otherwise `fallback`.
pub fn resolve_data_dir(fallback: impl FnOnce() -> Result<PathBuf>) -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => fallback(),
    }
}

/// Opens the journal store and preferences under `data_dir`, creating the
/// directory if needed.
pub fn open_data_dir(data_dir: &Path) -> Result<(Journal, SettingsStore)> {
    std::fs::create_dir_all(data_dir)?;
    let database = Database::new(data_dir.join(DATABASE_FILE))?;
    let journal = Journal::new(database, std::sync::Arc::new(JpegCompressor));
    let settings = SettingsStore::open(data_dir.join(SETTINGS_FILE));
    Ok((journal, settings))
}

#[cfg(feature = "desktop")]
pub(crate) struct AppState {
    pub(crate) journal: Journal,
    pub(crate) settings: SettingsStore,
    pub(crate) flow: tokio::sync::Mutex<Option<flow::EntryFlow>>,
    pub(crate) timers: timer::BrewTimers,
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use log::{info, warn};
    use tauri::{Emitter, Manager};
    use tokio::sync::broadcast::error::RecvError;

    init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let data_dir = resolve_data_dir(|| {
                    app.path()
                        .app_data_dir()
                        .map_err(|err| anyhow::anyhow!(err))
                })?;
                let (journal, settings) = open_data_dir(&data_dir)?;
                info!("Journal data in {}", data_dir.display());

                let timers = timer::BrewTimers::new();
                let mut updates = timers.subscribe();
                let app_handle = app.handle().clone();
                tauri::async_runtime::spawn(async move {
                    loop {
                        match updates.recv().await {
                            Ok(snapshot) => {
                                let _ = app_handle.emit("brew-timer-updated", snapshot);
                            }
                            Err(RecvError::Lagged(skipped)) => {
                                warn!("Dropped {skipped} timer updates");
                            }
                            Err(RecvError::Closed) => break,
                        }
                    }
                });

                app.manage(AppState {
                    journal,
                    settings,
                    flow: tokio::sync::Mutex::new(None),
                    timers,
                });
                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            commands::entries::list_entries,
            commands::entries::get_entry,
            commands::entries::edit_entry,
            commands::entries::delete_entry,
            commands::entries::toggle_favorite,
            commands::entries::list_roasters,
            commands::entries::count_entries,
            commands::flow::start_entry_flow,
            commands::flow::get_entry_flow,
            commands::flow::update_entry_draft,
            commands::flow::advance_entry_flow,
            commands::flow::go_back_entry_flow,
            commands::flow::skip_entry_step,
            commands::flow::select_brew_method,
            commands::flow::select_roast_level,
            commands::flow::select_serving_style,
            commands::flow::select_rating,
            commands::flow::get_entry_choices,
            commands::flow::toggle_tasting_note,
            commands::flow::set_entry_photo,
            commands::flow::save_entry_flow,
            commands::flow::cancel_entry_flow,
            commands::guides::list_guides,
            commands::guides::get_guide,
            commands::guides::scale_guide,
            commands::settings::get_settings,
            commands::settings::set_appearance_mode,
            commands::settings::set_temperature_unit,
            commands::timers::register_guide_timers,
            commands::timers::get_step_timers,
            commands::timers::toggle_step_timer,
            commands::timers::reset_step_timer,
            commands::timers::restart_step_timer,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
