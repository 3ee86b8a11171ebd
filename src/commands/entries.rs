use tauri::State;

use crate::{
    db::{CoffeeEntry, EntryQuery, EntrySummary},
    journal::EntryEdit,
    AppState,
};

#[tauri::command]
pub async fn list_entries(
    state: State<'_, AppState>,
    query: Option<EntryQuery>,
) -> Result<Vec<EntrySummary>, String> {
    state
        .journal
        .summaries(query.unwrap_or_default())
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_entry(state: State<'_, AppState>, entry_id: String) -> Result<CoffeeEntry, String> {
    state.journal.get(&entry_id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn edit_entry(
    state: State<'_, AppState>,
    entry_id: String,
    edit: EntryEdit,
) -> Result<CoffeeEntry, String> {
    state
        .journal
        .edit(&entry_id, edit)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_entry(state: State<'_, AppState>, entry_id: String) -> Result<(), String> {
    state
        .journal
        .delete(&entry_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn toggle_favorite(state: State<'_, AppState>, entry_id: String) -> Result<bool, String> {
    state
        .journal
        .toggle_favorite(&entry_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_roasters(state: State<'_, AppState>) -> Result<Vec<String>, String> {
    state.journal.roasters().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn count_entries(state: State<'_, AppState>) -> Result<u64, String> {
    state.journal.count().await.map_err(|e| e.to_string())
}
