use tauri::State;

use crate::{
    db::models::BrewMethod,
    guides,
    timer::{StepTimerKey, TimerSnapshot},
    AppState,
};

#[tauri::command]
pub async fn register_guide_timers(
    state: State<'_, AppState>,
    method: BrewMethod,
) -> Result<Vec<TimerSnapshot>, String> {
    let guide = guides::guide_for(method)
        .ok_or_else(|| format!("no brew guide for {}", method.display_name()))?;
    Ok(state.timers.register_guide(guide).await)
}

#[tauri::command]
pub async fn get_step_timers(state: State<'_, AppState>) -> Result<Vec<TimerSnapshot>, String> {
    Ok(state.timers.snapshots().await)
}

#[tauri::command]
pub async fn toggle_step_timer(
    state: State<'_, AppState>,
    method: BrewMethod,
    step_number: u32,
) -> Result<TimerSnapshot, String> {
    state
        .timers
        .toggle(StepTimerKey {
            method,
            step_number,
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn reset_step_timer(
    state: State<'_, AppState>,
    method: BrewMethod,
    step_number: u32,
) -> Result<TimerSnapshot, String> {
    state
        .timers
        .reset(StepTimerKey {
            method,
            step_number,
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn restart_step_timer(
    state: State<'_, AppState>,
    method: BrewMethod,
    step_number: u32,
) -> Result<TimerSnapshot, String> {
    state
        .timers
        .restart(StepTimerKey {
            method,
            step_number,
        })
        .await
        .map_err(|e| e.to_string())
}
