use tauri::{AppHandle, Emitter, State};

use crate::{
    settings::UserSettings,
    units::{AppearanceMode, TemperatureUnit},
    AppState,
};

fn broadcast(app_handle: &AppHandle, settings: &UserSettings) -> Result<(), String> {
    app_handle
        .emit("settings-updated", settings)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_settings(state: State<'_, AppState>) -> UserSettings {
    state.settings.snapshot()
}

#[tauri::command]
pub fn set_appearance_mode(
    state: State<'_, AppState>,
    app_handle: AppHandle,
    mode: AppearanceMode,
) -> Result<UserSettings, String> {
    state
        .settings
        .set_appearance_mode(mode)
        .map_err(|e| e.to_string())?;
    let settings = state.settings.snapshot();
    broadcast(&app_handle, &settings)?;
    Ok(settings)
}

/// Also re-expresses the water temperature of an entry in progress.
#[tauri::command]
pub async fn set_temperature_unit(
    state: State<'_, AppState>,
    app_handle: AppHandle,
    unit: TemperatureUnit,
) -> Result<UserSettings, String> {
    state
        .settings
        .set_temperature_unit(unit)
        .map_err(|e| e.to_string())?;
    if let Some(flow) = state.flow.lock().await.as_mut() {
        flow.draft_mut().set_temperature_unit(unit);
    }
    let settings = state.settings.snapshot();
    broadcast(&app_handle, &settings)?;
    Ok(settings)
}
