use crate::{
    db::models::BrewMethod,
    guides::{self, BrewGuide, ScaledGuide},
};

fn find_guide(method: BrewMethod) -> Result<&'static BrewGuide, String> {
    guides::guide_for(method)
        .ok_or_else(|| format!("no brew guide for {}", method.display_name()))
}

#[tauri::command]
pub fn list_guides() -> Vec<BrewGuide> {
    guides::all_guides().to_vec()
}

#[tauri::command]
pub fn get_guide(method: BrewMethod) -> Result<BrewGuide, String> {
    find_guide(method).cloned()
}

#[tauri::command]
pub fn scale_guide(method: BrewMethod, servings: u32) -> Result<ScaledGuide, String> {
    find_guide(method)?
        .scaled(servings)
        .map_err(|e| e.to_string())
}
