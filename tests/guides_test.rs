//! Guide scaling through the public API.

use coffeemio_lib::{
    db::models::BrewMethod,
    error::GuideError,
    guides::{all_guides, guide_for},
};

#[test]
fn chemex_scales_to_four_servings() {
    let chemex = guide_for(BrewMethod::Chemex).expect("chemex guide");
    let steps = chemex.steps_for_servings(4).expect("in range");

    assert!(steps[2].instruction.contains("Add 60g"));
    assert!(steps[4].instruction.contains("Pour to 960g total"));
    assert!(!steps[2].instruction.contains(" 30g"));
    assert!(!steps[4].instruction.contains(" 480g"));
}

#[test]
fn base_servings_render_the_authored_text() {
    let chemex = guide_for(BrewMethod::Chemex).expect("chemex guide");
    let steps = chemex.steps_for_servings(2).expect("in range");
    assert_eq!(steps, chemex.base_steps());
    assert!(steps[3].instruction.starts_with("Start timer and pour 60g of water"));
}

#[test]
fn out_of_range_servings_are_rejected() {
    let press = guide_for(BrewMethod::FrenchPress).expect("french press guide");
    assert_eq!(
        press.scaled(9).unwrap_err(),
        GuideError::ServingsOutOfRange {
            requested: 9,
            min: 1,
            max: 8
        }
    );
}

#[test]
fn guides_serialize_for_the_ui() {
    let json = serde_json::to_value(all_guides()).expect("serialize");
    let first = &json[0];
    assert_eq!(first["method"], "chemex");
    assert_eq!(first["servingInfo"]["baseServings"], 2);
    assert_eq!(
        first["steps"][2]["instruction"],
        "Add {coffee}g of medium-coarse ground coffee (about the texture of kosher salt). Gently shake the Chemex to level the grounds, creating a flat bed."
    );
}
