use tauri::State;

use crate::{
    db::{
        models::{BrewMethod, RoastLevel, ServingStyle},
        CoffeeEntry,
    },
    display,
    flow::{DraftPatch, EntryFlow, FlowVariant, FlowView},
    AppState,
};

const NO_FLOW: &str = "no entry in progress";

/// Runs `apply` against the active flow and returns its new view.
async fn with_flow(
    state: &State<'_, AppState>,
    apply: impl FnOnce(&mut EntryFlow),
) -> Result<FlowView, String> {
    let mut guard = state.flow.lock().await;
    let flow = guard.as_mut().ok_or_else(|| NO_FLOW.to_string())?;
    apply(flow);
    Ok(flow.view())
}

#[tauri::command]
pub async fn start_entry_flow(
    state: State<'_, AppState>,
    variant: Option<FlowVariant>,
) -> Result<FlowView, String> {
    let flow = EntryFlow::new(variant.unwrap_or_default(), state.settings.temperature_unit());
    let view = flow.view();
    *state.flow.lock().await = Some(flow);
    Ok(view)
}

#[tauri::command]
pub async fn get_entry_flow(state: State<'_, AppState>) -> Result<Option<FlowView>, String> {
    Ok(state.flow.lock().await.as_ref().map(EntryFlow::view))
}

#[tauri::command]
pub async fn update_entry_draft(
    state: State<'_, AppState>,
    patch: DraftPatch,
) -> Result<FlowView, String> {
    with_flow(&state, |flow| flow.draft_mut().apply(patch)).await
}

#[tauri::command]
pub async fn advance_entry_flow(state: State<'_, AppState>) -> Result<FlowView, String> {
    with_flow(&state, |flow| {
        flow.advance();
    })
    .await
}

#[tauri::command]
pub async fn go_back_entry_flow(state: State<'_, AppState>) -> Result<FlowView, String> {
    with_flow(&state, |flow| {
        flow.go_back();
    })
    .await
}

#[tauri::command]
pub async fn skip_entry_step(state: State<'_, AppState>) -> Result<FlowView, String> {
    with_flow(&state, |flow| {
        flow.skip();
    })
    .await
}

#[tauri::command]
pub async fn select_brew_method(
    state: State<'_, AppState>,
    method: BrewMethod,
) -> Result<FlowView, String> {
    with_flow(&state, |flow| flow.select_brew_method(method)).await
}

#[tauri::command]
pub async fn select_roast_level(
    state: State<'_, AppState>,
    level: RoastLevel,
) -> Result<FlowView, String> {
    with_flow(&state, |flow| flow.select_roast_level(level)).await
}

#[tauri::command]
pub async fn select_serving_style(
    state: State<'_, AppState>,
    style: ServingStyle,
) -> Result<FlowView, String> {
    with_flow(&state, |flow| flow.select_serving_style(style)).await
}

#[tauri::command]
pub async fn select_rating(state: State<'_, AppState>, rating: f64) -> Result<FlowView, String> {
    with_flow(&state, |flow| flow.select_rating(rating)).await
}

/// Suggestion chips for the tasting notes and spice pickers.
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryChoices {
    tasting_notes: &'static [&'static str],
    spices: &'static [&'static str],
}

#[tauri::command]
pub fn get_entry_choices() -> EntryChoices {
    EntryChoices {
        tasting_notes: &display::COMMON_TASTING_NOTES,
        spices: &display::COMMON_SPICES,
    }
}

#[tauri::command]
pub async fn toggle_tasting_note(
    state: State<'_, AppState>,
    note: String,
) -> Result<FlowView, String> {
    with_flow(&state, |flow| flow.draft_mut().toggle_tasting_note(&note)).await
}

#[tauri::command]
pub async fn set_entry_photo(
    state: State<'_, AppState>,
    bytes: Option<Vec<u8>>,
) -> Result<FlowView, String> {
    with_flow(&state, |flow| flow.draft_mut().photo = bytes).await
}

/// Saves the draft and ends the flow. On failure the flow stays open so the
/// user can fix the missing field.
#[tauri::command]
pub async fn save_entry_flow(state: State<'_, AppState>) -> Result<CoffeeEntry, String> {
    let mut guard = state.flow.lock().await;
    let flow = guard.as_ref().ok_or_else(|| NO_FLOW.to_string())?;
    let entry = state
        .journal
        .save_flow(flow)
        .await
        .map_err(|e| e.to_string())?;
    *guard = None;
    Ok(entry)
}

#[tauri::command]
pub async fn cancel_entry_flow(state: State<'_, AppState>) -> Result<(), String> {
    *state.flow.lock().await = None;
    Ok(())
}
