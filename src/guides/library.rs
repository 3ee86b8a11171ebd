//! Built-in guide content. Quantities that scale with servings are written as
//! `{coffee}`, `{water}` and `{bloom}` slots; everything else is literal.

use once_cell::sync::Lazy;

use crate::db::models::BrewMethod;

use super::{
    BrewGuide, Difficulty, EquipmentItem, GuideStep, InstructionTemplate, QuickStats,
    ServingInfo, StepTimer, TroubleshootingItem,
};

static GUIDES: Lazy<Vec<BrewGuide>> = Lazy::new(|| {
    vec![
        chemex(),
        french_press(),
        v60(),
        aeropress(),
        espresso(),
        cold_brew(),
        moka_pot(),
    ]
});

/// Every guide, in library order. Built on first use.
pub fn all_guides() -> &'static [BrewGuide] {
    GUIDES.as_slice()
}

pub fn guide_for(method: BrewMethod) -> Option<&'static BrewGuide> {
    all_guides().iter().find(|guide| guide.method == method)
}

fn step(step_number: u32, title: &'static str, instruction: &str) -> GuideStep {
    GuideStep {
        step_number,
        title,
        instruction: InstructionTemplate::authored(instruction),
        timer: None,
    }
}

fn timed(
    step_number: u32,
    title: &'static str,
    instruction: &str,
    seconds: u32,
    label: &'static str,
) -> GuideStep {
    GuideStep {
        timer: Some(StepTimer { seconds, label }),
        ..step(step_number, title, instruction)
    }
}

fn gear(name: &'static str, icon: &'static str) -> EquipmentItem {
    EquipmentItem {
        name,
        icon,
        is_optional: false,
    }
}

fn optional_gear(name: &'static str, icon: &'static str) -> EquipmentItem {
    EquipmentItem {
        is_optional: true,
        ..gear(name, icon)
    }
}

fn fix(problem: &'static str, solution: &'static str) -> TroubleshootingItem {
    TroubleshootingItem { problem, solution }
}

fn chemex() -> BrewGuide {
    BrewGuide {
        method: BrewMethod::Chemex,
        name: "Chemex",
        short_description: "Clean, bright cup with clarity and complexity",
        full_description: "The Chemex produces a clean, bright cup with exceptional clarity and complexity. Its thick bonded paper filters remove oils and sediment for a tea-like body while preserving delicate flavor notes. Perfect for showcasing the nuanced flavors of single-origin coffees.",
        difficulty: Difficulty::Medium,
        brew_time_range: "3.5-4.5 min",
        quick_stats: QuickStats {
            brew_time: "3.5-4.5 minutes",
            grind_size: "Medium-coarse",
            ratio: "1:16 (coffee:water)",
            ideal_for: "Bright, clean, fruity coffees",
            invented: Some("1941 by Dr. Peter Schlumbohm"),
        },
        equipment: vec![
            gear("Chemex brewer", "triangle.fill"),
            gear("Chemex bonded filter", "doc.fill"),
            gear("Coffee grinder", "circle.grid.cross.fill"),
            gear("Gooseneck kettle", "drop.fill"),
            gear("Kitchen scale", "scalemass.fill"),
            gear("Timer", "timer"),
            optional_gear("Thermometer", "thermometer"),
        ],
        steps: vec![
            step(
                1,
                "Boil Water",
                "Heat water to 195-205°F (90-96°C). If you don't have a thermometer, bring water to a boil and let it rest for 30 seconds.",
            ),
            timed(
                2,
                "Prepare Filter",
                "Fold the Chemex filter into a cone with the triple-fold facing the spout. Place in brewer and rinse with hot water to remove paper taste and preheat the vessel. Discard rinse water.",
                30,
                "Rinse & Preheat",
            ),
            step(
                3,
                "Add Coffee",
                "Add {coffee}g of medium-coarse ground coffee (about the texture of kosher salt). Gently shake the Chemex to level the grounds, creating a flat bed.",
            ),
            timed(
                4,
                "Bloom",
                "Start timer and pour {bloom}g of water (2x coffee weight) in a spiral motion, ensuring all grounds are saturated. Let bloom for 30-45 seconds as CO2 escapes.",
                45,
                "Bloom Phase",
            ),
            timed(
                5,
                "Main Pour",
                "Pour water in slow, steady circles from center outward, avoiding the filter edges. Pour to {water}g total, maintaining a consistent water level. This should take 2-3 minutes from start.",
                180,
                "Main Pour",
            ),
            timed(
                6,
                "Final Draw",
                "Once all water has passed through (around 4-4.5 minutes total), remove and discard the filter. The coffee bed should be flat.",
                60,
                "Drawdown",
            ),
            step(
                7,
                "Serve",
                "Give the Chemex a gentle swirl to mix the brew. Pour into your favorite cup and enjoy immediately for best flavor.",
            ),
        ],
        tips: vec![
            "Use coffee roasted within 2-4 weeks for optimal flavor",
            "Grind just before brewing to preserve aromatics",
            "Pour in a slow, controlled circular motion - avoid pouring directly on the filter",
            "Total brew time should be 4-4.5 minutes; adjust grind if faster or slower",
            "The coffee bed should be flat after brewing - if it's domed or channeled, adjust your technique",
            "Keep your kettle height consistent during pouring for even extraction",
            "Room temperature is important - cold kitchen can slow extraction",
        ],
        troubleshooting: vec![
            fix(
                "Coffee tastes bitter or harsh",
                "Your grind is too fine or water is too hot. Try a coarser grind or lower water temperature (195°F).",
            ),
            fix(
                "Coffee tastes weak or sour",
                "Your grind is too coarse or water isn't hot enough. Try a finer grind or increase water temperature (205°F).",
            ),
            fix(
                "Brew time is too slow (over 5 minutes)",
                "Grind is too fine or you're pouring too fast initially. Use a coarser grind and pour more gently during bloom.",
            ),
            fix(
                "Brew time is too fast (under 3.5 minutes)",
                "Grind is too coarse. Try a finer grind setting on your grinder.",
            ),
            fix(
                "Coffee bed is uneven or channeled",
                "Ensure grounds are level before brewing. Pour in consistent circles, avoiding the edges. Don't disturb the bed during brewing.",
            ),
            fix(
                "Too much sediment in cup",
                "Make sure you're using authentic Chemex bonded filters (thicker than standard). Rinse the filter thoroughly before brewing.",
            ),
        ],
        serving_info: ServingInfo {
            base_servings: 2,
            base_coffee_grams: 30.0,
            base_water_grams: 480.0,
            min_servings: 1,
            max_servings: 6,
        },
    }
}

fn french_press() -> BrewGuide {
    BrewGuide {
        method: BrewMethod::FrenchPress,
        name: "French Press",
        short_description: "Full-bodied, rich cup with natural oils and depth",
        full_description: "The French Press (also called a press pot or plunger pot) is a full immersion brewing method that produces a rich, full-bodied cup with all the natural oils and fine particles intact. Perfect for those who enjoy a heavier, more textured coffee experience with deep, bold flavors.",
        difficulty: Difficulty::Easy,
        brew_time_range: "4-5 min",
        quick_stats: QuickStats {
            brew_time: "4-5 minutes",
            grind_size: "Coarse",
            ratio: "1:15 (coffee:water)",
            ideal_for: "Bold, full-bodied coffees",
            invented: Some("1929 in France"),
        },
        equipment: vec![
            gear("French Press", "cylinder.fill"),
            gear("Coffee grinder", "circle.grid.cross.fill"),
            gear("Kettle", "drop.fill"),
            gear("Kitchen scale", "scalemass.fill"),
            gear("Timer", "timer"),
            gear("Spoon for stirring", "fork.knife"),
            optional_gear("Thermometer", "thermometer"),
        ],
        steps: vec![
            step(
                1,
                "Boil Water",
                "Heat water to 195-205°F (90-96°C). For a 1-liter French Press, you'll need about {water}ml of water. If you don't have a thermometer, bring water to a boil and let it rest for 45 seconds.",
            ),
            timed(
                2,
                "Preheat French Press",
                "Pour hot water into the empty French Press to preheat it. Swirl the water around, then discard. This helps maintain brewing temperature.",
                20,
                "Preheat",
            ),
            step(
                3,
                "Add Coffee",
                "Add {coffee}g of coarsely ground coffee to the preheated French Press. The grind should resemble breadcrumbs or sea salt - too fine and you'll get muddy, over-extracted coffee.",
            ),
            timed(
                4,
                "Start Bloom",
                "Start your timer and pour about {bloom}g of hot water (2x coffee weight), ensuring all grounds are saturated. Stir gently with a spoon to break up any dry clumps.",
                30,
                "Bloom",
            ),
            step(
                5,
                "Add Remaining Water",
                "Pour the remaining water (to {water}g total) in a circular motion. Place the lid on top with the plunger pulled all the way up. Don't plunge yet!",
            ),
            timed(
                6,
                "Steep",
                "Let the coffee steep for 4 minutes total (from when you started the timer). During this time, the coffee is extracting in the hot water. Resist the urge to stir or disturb it.",
                210,
                "Steep Time",
            ),
            step(
                7,
                "Stir the Crust",
                "After 4 minutes, remove the lid and use a spoon to gently stir and break the crust of grounds floating on top. You can also skim off any foam if desired.",
            ),
            step(
                8,
                "Plunge & Serve",
                "Replace the lid and slowly press the plunger down with steady, even pressure. This should take about 20-30 seconds. Pour immediately into cups to prevent over-extraction.",
            ),
        ],
        tips: vec![
            "Use fresh, coarsely ground coffee - grind consistency is crucial for French Press",
            "Always preheat your French Press to maintain temperature stability",
            "Don't press the plunger too quickly - slow and steady prevents grounds from escaping",
            "Pour all the coffee immediately after plunging - leaving it in the press continues extraction",
            "Some sediment at the bottom of your cup is normal and part of the French Press character",
            "For a cleaner cup, you can use a paper filter between the plunger and coffee",
            "Experiment with steep time: 3 minutes for lighter, 5 minutes for bolder",
            "Use a burr grinder for consistent coarse grounds",
        ],
        troubleshooting: vec![
            fix(
                "Coffee tastes bitter or over-extracted",
                "Your grind might be too fine or steep time too long. Try a coarser grind and reduce steep time to 3-3.5 minutes. Also ensure water isn't too hot (over 205°F).",
            ),
            fix(
                "Coffee tastes weak or under-extracted",
                "Your grind might be too coarse or water not hot enough. Try a slightly finer grind or increase steep time to 5 minutes. Ensure water is at least 195°F.",
            ),
            fix(
                "Too much sediment in cup",
                "Grind is too fine. Use a coarser grind and press slowly. Let coffee settle for 30 seconds after plunging before pouring. Pour gently and stop before reaching the very bottom.",
            ),
            fix(
                "Plunger is hard to press down",
                "Grind is too fine causing a clog. Use a much coarser grind next time. For this brew, try plunging slowly with steady pressure.",
            ),
            fix(
                "Coffee tastes muddy or gritty",
                "Grind is too fine. French Press requires a coarse grind similar to sea salt. Consider using a burr grinder for more consistent particles.",
            ),
            fix(
                "Coffee cools down too quickly",
                "Preheat your French Press thoroughly with hot water before brewing. Also consider preheating your cups. Use a thermal carafe if available.",
            ),
        ],
        serving_info: ServingInfo {
            base_servings: 3,
            base_coffee_grams: 45.0,
            base_water_grams: 675.0,
            min_servings: 1,
            max_servings: 8,
        },
    }
}

fn v60() -> BrewGuide {
    BrewGuide {
        method: BrewMethod::PourOver,
        name: "V60",
        short_description: "Sweet, articulate single cup with a fast drawdown",
        full_description: "The Hario V60's steep cone, spiral ribs and single large hole give the brewer full control over flow rate. Small changes in grind and pour speed show up directly in the cup, which makes it a favorite for dialing in light roasts and highlighting sweetness and acidity.",
        difficulty: Difficulty::Medium,
        brew_time_range: "2.5-3.5 min",
        quick_stats: QuickStats {
            brew_time: "2.5-3.5 minutes",
            grind_size: "Medium-fine",
            ratio: "1:16.7 (coffee:water)",
            ideal_for: "Light roasts, washed coffees",
            invented: Some("2004 by Hario"),
        },
        equipment: vec![
            gear("V60 dripper", "drop.fill"),
            gear("V60 paper filter", "doc.fill"),
            gear("Coffee grinder", "circle.grid.cross.fill"),
            gear("Gooseneck kettle", "drop.fill"),
            gear("Kitchen scale", "scalemass.fill"),
            gear("Timer", "timer"),
            optional_gear("Thermometer", "thermometer"),
        ],
        steps: vec![
            step(
                1,
                "Heat Water",
                "Heat water to 200-205°F (93-96°C). Lighter roasts like the hotter end of the range.",
            ),
            timed(
                2,
                "Rinse Filter",
                "Seat the paper filter in the dripper and rinse it thoroughly with hot water to remove paper taste and warm the dripper and server. Discard rinse water.",
                20,
                "Rinse",
            ),
            step(
                3,
                "Add Coffee",
                "Add {coffee}g of medium-fine ground coffee, about the texture of table salt. Tap the dripper gently so the bed is level, then make a small well in the center.",
            ),
            timed(
                4,
                "Bloom",
                "Start the timer and pour {bloom}g of water (2x coffee weight), wetting every ground. Give the dripper a gentle swirl and let it bloom.",
                40,
                "Bloom",
            ),
            timed(
                5,
                "Pulse Pours",
                "Pour in slow spirals in two or three pulses, keeping the water level steady, until you reach {water}g total. Avoid pouring straight onto the paper.",
                90,
                "Main Pour",
            ),
            timed(
                6,
                "Drawdown",
                "Give one last gentle swirl to flatten the bed and let the water drain completely. Total time should land around 3 minutes.",
                45,
                "Drawdown",
            ),
            step(
                7,
                "Serve",
                "Remove the dripper, swirl the server and pour. Let the cup cool for a minute; sweetness opens up as it does.",
            ),
        ],
        tips: vec![
            "Grind finer if the drawdown finishes well before 2:30, coarser if it runs past 3:30",
            "A flat bed at the end means an even extraction",
            "Keep the kettle spout low and close to the bed for gentle agitation",
            "Weigh every pour; small differences in total water change the cup noticeably",
        ],
        troubleshooting: vec![
            fix(
                "Drawdown stalls",
                "The grind is too fine or fines are clogging the paper. Grind coarser and swirl less aggressively.",
            ),
            fix(
                "Cup tastes thin and sour",
                "Extraction is too low. Grind finer, use hotter water, or extend the bloom.",
            ),
            fix(
                "Cup tastes hollow and bitter",
                "Water may be channeling. Pour more slowly in smaller circles and keep the bed level.",
            ),
        ],
        serving_info: ServingInfo {
            base_servings: 1,
            base_coffee_grams: 15.0,
            base_water_grams: 250.0,
            min_servings: 1,
            max_servings: 3,
        },
    }
}

fn aeropress() -> BrewGuide {
    BrewGuide {
        method: BrewMethod::AeroPress,
        name: "AeroPress",
        short_description: "Forgiving, fast and travel friendly",
        full_description: "The AeroPress combines immersion with gentle air pressure to push coffee through a paper microfilter. It brews a clean, low-acidity cup in about two minutes and tolerates a wide range of grinds and recipes, which makes it ideal for experimenting.",
        difficulty: Difficulty::Easy,
        brew_time_range: "2-2.5 min",
        quick_stats: QuickStats {
            brew_time: "2-2.5 minutes",
            grind_size: "Medium-fine",
            ratio: "1:15 (coffee:water)",
            ideal_for: "Travel, experimenting, single cups",
            invented: Some("2005 by Alan Adler"),
        },
        equipment: vec![
            gear("AeroPress", "chart.line.uptrend.xyaxis"),
            gear("AeroPress paper filter", "doc.fill"),
            gear("Coffee grinder", "circle.grid.cross.fill"),
            gear("Kettle", "drop.fill"),
            gear("Kitchen scale", "scalemass.fill"),
            gear("Sturdy mug", "cup.and.saucer.fill"),
            optional_gear("Paddle or spoon", "fork.knife"),
        ],
        steps: vec![
            step(
                1,
                "Heat Water",
                "Heat water to 185-195°F (85-90°C). The AeroPress rewards slightly cooler water than pour over.",
            ),
            step(
                2,
                "Prepare",
                "Place a paper filter in the cap and rinse it with hot water. Assemble the chamber on top of your mug.",
            ),
            step(
                3,
                "Add Coffee",
                "Add {coffee}g of medium-fine ground coffee to the chamber and shake it level.",
            ),
            timed(
                4,
                "Bloom",
                "Start the timer and pour {bloom}g of water (2x coffee weight). Stir gently so every ground is wet.",
                30,
                "Bloom",
            ),
            timed(
                5,
                "Fill & Steep",
                "Pour the remaining water up to {water}g total. Insert the plunger about a centimeter to create a seal and let it steep.",
                60,
                "Steep",
            ),
            timed(
                6,
                "Press",
                "Remove the plunger, give one gentle stir, reinsert it and press down slowly and steadily. Stop when you hear a hiss.",
                30,
                "Press",
            ),
            step(
                7,
                "Serve",
                "Remove the AeroPress, taste, and add hot water if you prefer a longer cup.",
            ),
        ],
        tips: vec![
            "Press slowly; forcing the plunger pushes fines through and adds bitterness",
            "Try the inverted method for longer steeps without drip-through",
            "Rinse the filter so paper taste doesn't reach the cup",
            "Push the puck straight into the compost right after brewing for easy cleanup",
        ],
        troubleshooting: vec![
            fix(
                "Plunger is very hard to press",
                "The grind is too fine. Grind a step coarser or press more gently.",
            ),
            fix(
                "Coffee drips through before pressing",
                "Insert the plunger right after filling to hold a vacuum, or use the inverted method.",
            ),
            fix(
                "Cup tastes flat",
                "Use fresher coffee or hotter water and extend the steep by 30 seconds.",
            ),
        ],
        serving_info: ServingInfo {
            base_servings: 1,
            base_coffee_grams: 15.0,
            base_water_grams: 225.0,
            min_servings: 1,
            max_servings: 2,
        },
    }
}

fn espresso() -> BrewGuide {
    BrewGuide {
        method: BrewMethod::Espresso,
        name: "Espresso",
        short_description: "Concentrated, syrupy shot with crema",
        full_description: "Espresso forces hot water through a tightly packed puck of finely ground coffee at around nine bars of pressure. The result is a small, intense shot with a layer of crema that can be enjoyed on its own or used as the base for milk drinks.",
        difficulty: Difficulty::Hard,
        brew_time_range: "25-30 sec",
        quick_stats: QuickStats {
            brew_time: "25-30 seconds",
            grind_size: "Fine",
            ratio: "1:2 (coffee:yield)",
            ideal_for: "Straight shots and milk drinks",
            invented: Some("1884 by Angelo Moriondo"),
        },
        equipment: vec![
            gear("Espresso machine", "cup.and.saucer.fill"),
            gear("Burr grinder", "circle.grid.cross.fill"),
            gear("Tamper", "circle.fill"),
            gear("Kitchen scale", "scalemass.fill"),
            gear("Timer", "timer"),
            optional_gear("Distribution tool", "circle.grid.3x3.fill"),
            optional_gear("Milk pitcher", "drop.fill"),
        ],
        steps: vec![
            timed(
                1,
                "Warm Up",
                "Turn on the machine and let the group head and portafilter heat fully. Run a blank shot to stabilize the temperature.",
                900,
                "Warm Up",
            ),
            step(
                2,
                "Dose",
                "Grind and dose {coffee}g of finely ground coffee into the dry portafilter basket.",
            ),
            step(
                3,
                "Distribute & Tamp",
                "Level the grounds, then tamp straight down with firm, even pressure until the bed feels solid. Wipe the rim of the basket clean.",
            ),
            timed(
                4,
                "Pull the Shot",
                "Lock in the portafilter, start the shot and the timer together. Stop at {water}g of espresso in the cup, aiming for 25-30 seconds.",
                30,
                "Extraction",
            ),
            step(
                5,
                "Taste & Adjust",
                "Sour and fast means grind finer; bitter and slow means grind coarser. Change one variable at a time.",
            ),
        ],
        tips: vec![
            "Weigh the shot in the cup instead of relying on volume",
            "Purge the group head between shots to keep temperature stable",
            "Keep the portafilter in the group head so it stays hot",
            "Fresh coffee (7-21 days off roast) gives the best crema",
        ],
        troubleshooting: vec![
            fix(
                "Shot runs too fast",
                "Grind finer or increase the dose slightly. Check that the tamp is level.",
            ),
            fix(
                "Shot chokes or drips",
                "Grind coarser. Make sure the basket isn't overfilled.",
            ),
            fix(
                "Water spurts from one side of the puck",
                "The puck is channeling. Improve distribution before tamping and tamp level.",
            ),
        ],
        serving_info: ServingInfo {
            base_servings: 1,
            base_coffee_grams: 18.0,
            base_water_grams: 36.0,
            min_servings: 1,
            max_servings: 2,
        },
    }
}

fn cold_brew() -> BrewGuide {
    BrewGuide {
        method: BrewMethod::ColdBrew,
        name: "Cold Brew",
        short_description: "Smooth, low-acid concentrate steeped overnight",
        full_description: "Cold brew trades heat for time. Coarse grounds steep in room-temperature water for half a day or more, extracting chocolatey sweetness with very little acidity or bitterness. The concentrate keeps for a week in the fridge and is diluted to taste.",
        difficulty: Difficulty::Easy,
        brew_time_range: "12-18 hr",
        quick_stats: QuickStats {
            brew_time: "12-18 hours",
            grind_size: "Extra coarse",
            ratio: "1:8 (coffee:water, concentrate)",
            ideal_for: "Hot days, iced drinks, low acidity",
            invented: None,
        },
        equipment: vec![
            gear("Large jar or pitcher", "cylinder.fill"),
            gear("Coffee grinder", "circle.grid.cross.fill"),
            gear("Kitchen scale", "scalemass.fill"),
            gear("Fine mesh strainer or filter", "line.3.horizontal.decrease"),
            optional_gear("Cheesecloth", "square.grid.3x3"),
        ],
        steps: vec![
            step(
                1,
                "Grind",
                "Grind {coffee}g of coffee extra coarse, about the size of peppercorns.",
            ),
            step(
                2,
                "Combine",
                "Add the grounds to the jar and pour in {water}g of cold or room-temperature filtered water.",
            ),
            step(
                3,
                "Stir",
                "Stir gently until every ground is wet. Cover the jar.",
            ),
            step(
                4,
                "Steep",
                "Leave at room temperature or in the fridge for 12-18 hours. Longer steeps taste stronger and heavier.",
            ),
            step(
                5,
                "Strain",
                "Pour through a fine mesh strainer, then through a paper filter or cheesecloth for a cleaner concentrate.",
            ),
            step(
                6,
                "Dilute & Serve",
                "Dilute the concentrate 1:1 with water or milk over ice. Refrigerate leftovers for up to a week.",
            ),
        ],
        tips: vec![
            "Use a medium to dark roast for classic chocolatey cold brew",
            "Filtered water makes a noticeable difference over long steeps",
            "Don't squeeze the grounds when straining; it adds bitterness",
        ],
        troubleshooting: vec![
            fix(
                "Concentrate tastes weak",
                "Steep longer or use a finer grind.",
            ),
            fix(
                "Concentrate tastes bitter or woody",
                "Shorten the steep or grind coarser.",
            ),
            fix(
                "Cup is cloudy or silty",
                "Strain a second time through a paper filter.",
            ),
        ],
        serving_info: ServingInfo {
            base_servings: 4,
            base_coffee_grams: 100.0,
            base_water_grams: 800.0,
            min_servings: 2,
            max_servings: 8,
        },
    }
}

fn moka_pot() -> BrewGuide {
    BrewGuide {
        method: BrewMethod::MokaPot,
        name: "Moka Pot",
        short_description: "Strong, stovetop coffee with espresso-like intensity",
        full_description: "The moka pot uses steam pressure from the lower chamber to push water up through a bed of coffee and into the top chamber. It makes a strong, rich coffee close to espresso in character without any special machine.",
        difficulty: Difficulty::Medium,
        brew_time_range: "4-5 min",
        quick_stats: QuickStats {
            brew_time: "4-5 minutes",
            grind_size: "Fine to medium-fine",
            ratio: "1:10 (coffee:water)",
            ideal_for: "Strong, espresso-style coffee at home",
            invented: Some("1933 by Alfonso Bialetti"),
        },
        equipment: vec![
            gear("Moka pot", "flame.fill"),
            gear("Coffee grinder", "circle.grid.cross.fill"),
            gear("Kettle", "drop.fill"),
            gear("Kitchen scale", "scalemass.fill"),
            optional_gear("Towel or oven mitt", "hand.raised.fill"),
        ],
        steps: vec![
            step(
                1,
                "Preheat Water",
                "Fill the bottom chamber with {water}g of just-boiled water, up to but not above the safety valve. Hot water shortens time on the stove and avoids a cooked taste.",
            ),
            step(
                2,
                "Fill the Basket",
                "Fill the basket with {coffee}g of fine coffee. Level it with a finger but do not tamp.",
            ),
            step(
                3,
                "Assemble",
                "Wipe grounds off the rim and screw the top on firmly, using a towel because the base is hot.",
            ),
            timed(
                4,
                "Brew",
                "Place on medium heat with the lid open. Coffee should flow out in a steady, honey-colored stream.",
                180,
                "Brewing",
            ),
            step(
                5,
                "Stop the Brew",
                "When the stream turns pale and starts to gurgle, take the pot off the heat and cool the base under running water.",
            ),
            step(
                6,
                "Serve",
                "Stir the coffee in the top chamber and serve immediately, straight or topped with hot water or milk.",
            ),
        ],
        tips: vec![
            "Never tamp the grounds; the pressure can build dangerously",
            "Keep the heat moderate for a slow, even flow",
            "Clean with water only and let parts dry fully",
        ],
        troubleshooting: vec![
            fix(
                "Coffee tastes burnt or metallic",
                "The heat is too high or the pot sat on the stove too long. Lower the heat and stop at the first gurgle.",
            ),
            fix(
                "Coffee sputters violently",
                "Lower the heat; the water is boiling too hard.",
            ),
            fix(
                "Little or no coffee comes up",
                "The grind is too fine or the basket is overfilled. Use a slightly coarser grind.",
            ),
        ],
        serving_info: ServingInfo {
            base_servings: 2,
            base_coffee_grams: 18.0,
            base_water_grams: 180.0,
            min_servings: 1,
            max_servings: 4,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guides::Quantity;

    /// True when `text` holds `{grams}g` not preceded by another digit.
    fn has_gram_token(text: &str, grams: u32) -> bool {
        let token = format!("{grams}g");
        text.match_indices(&token).any(|(idx, _)| {
            !text[..idx]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_digit())
        })
    }

    fn instruction(method: BrewMethod, servings: u32, step_number: u32) -> String {
        guide_for(method)
            .unwrap()
            .steps_for_servings(servings)
            .unwrap()
            .into_iter()
            .find(|step| step.step_number == step_number)
            .unwrap()
            .instruction
    }

    #[test]
    fn library_order_and_lookup() {
        let methods: Vec<BrewMethod> = all_guides().iter().map(|g| g.method).collect();
        assert_eq!(
            methods,
            vec![
                BrewMethod::Chemex,
                BrewMethod::FrenchPress,
                BrewMethod::PourOver,
                BrewMethod::AeroPress,
                BrewMethod::Espresso,
                BrewMethod::ColdBrew,
                BrewMethod::MokaPot,
            ]
        );
        assert_eq!(guide_for(BrewMethod::PourOver).unwrap().name, "V60");
        assert!(guide_for(BrewMethod::Siphon).is_none());
        assert!(guide_for(BrewMethod::Drip).is_none());
    }

    #[test]
    fn every_template_parses_strictly() {
        for guide in all_guides() {
            for step in &guide.steps {
                assert!(
                    InstructionTemplate::parse(step.instruction.source()).is_ok(),
                    "{} step {}",
                    guide.name,
                    step.step_number
                );
            }
        }
    }

    #[test]
    fn steps_are_numbered_in_order() {
        for guide in all_guides() {
            for (idx, step) in guide.steps.iter().enumerate() {
                assert_eq!(step.step_number as usize, idx + 1, "{}", guide.name);
            }
        }
    }

    #[test]
    fn base_servings_sit_inside_their_range() {
        for guide in all_guides() {
            let info = guide.serving_info;
            assert!(info.contains(info.base_servings), "{}", guide.name);
            assert!(info.min_servings >= 1, "{}", guide.name);
        }
    }

    #[test]
    fn scaling_is_identity_at_base_and_linear_elsewhere() {
        for guide in all_guides() {
            let info = guide.serving_info;
            assert_eq!(
                f64::from(info.scaled_coffee(info.base_servings)),
                info.base_coffee_grams
            );
            for servings in info.min_servings..=info.max_servings {
                let exact =
                    info.base_coffee_grams * f64::from(servings) / f64::from(info.base_servings);
                assert!((f64::from(info.scaled_coffee(servings)) - exact).abs() <= 0.5);
                assert_eq!(info.scaled_bloom(servings), 2 * info.scaled_coffee(servings));
            }
        }
    }

    #[test]
    fn base_rendering_reproduces_authored_quantities() {
        for guide in all_guides() {
            let info = guide.serving_info;
            let base = guide.steps_for_servings(info.base_servings).unwrap();
            assert_eq!(base, guide.base_steps());
            for (rendered, step) in base.iter().zip(&guide.steps) {
                let expected = step
                    .instruction
                    .source()
                    .replace("{coffee}", &info.scaled_coffee(info.base_servings).to_string())
                    .replace("{water}", &info.scaled_water(info.base_servings).to_string())
                    .replace("{bloom}", &info.scaled_bloom(info.base_servings).to_string());
                assert_eq!(rendered.instruction, expected);
            }
        }
    }

    #[test]
    fn scaled_text_drops_stale_base_quantities() {
        for guide in all_guides() {
            let info = guide.serving_info;
            let base = info.base_recipe();
            for servings in info.min_servings..=info.max_servings {
                if servings == info.base_servings {
                    continue;
                }
                let recipe = info.scale(servings).unwrap();
                let fresh = [recipe.coffee_grams, recipe.water_grams, recipe.bloom_grams];
                for (rendered, step) in guide
                    .steps_for_servings(servings)
                    .unwrap()
                    .iter()
                    .zip(&guide.steps)
                {
                    for quantity in step.instruction.slots() {
                        let stale = quantity.grams(&base);
                        let now = quantity.grams(&recipe);
                        assert!(has_gram_token(&rendered.instruction, now) || quantity == Quantity::Water);
                        if !fresh.contains(&stale) {
                            assert!(
                                !has_gram_token(&rendered.instruction, stale),
                                "{} x{servings} step {}: {}",
                                guide.name,
                                step.step_number,
                                rendered.instruction
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn chemex_for_four() {
        assert_eq!(
            instruction(BrewMethod::Chemex, 4, 3),
            "Add 60g of medium-coarse ground coffee (about the texture of kosher salt). Gently shake the Chemex to level the grounds, creating a flat bed."
        );
        assert!(instruction(BrewMethod::Chemex, 4, 4).contains("pour 120g of water (2x coffee weight)"));
        assert!(instruction(BrewMethod::Chemex, 4, 5).contains("Pour to 960g total"));
    }

    #[test]
    fn french_press_for_two() {
        assert!(instruction(BrewMethod::FrenchPress, 2, 1).contains("about 450ml of water"));
        assert_eq!(
            instruction(BrewMethod::FrenchPress, 3, 1),
            "Heat water to 195-205°F (90-96°C). For a 1-liter French Press, you'll need about 675ml of water. If you don't have a thermometer, bring water to a boil and let it rest for 45 seconds."
        );
        assert!(instruction(BrewMethod::FrenchPress, 2, 3).starts_with("Add 30g of coarsely"));
        assert!(instruction(BrewMethod::FrenchPress, 2, 4).contains("about 60g of hot water"));
        assert!(instruction(BrewMethod::FrenchPress, 2, 5).contains("(to 450g total)"));
    }

    #[test]
    fn v60_for_two() {
        assert!(instruction(BrewMethod::PourOver, 2, 3).starts_with("Add 30g of medium-fine"));
        assert!(instruction(BrewMethod::PourOver, 2, 4).contains("pour 60g of water"));
        assert!(instruction(BrewMethod::PourOver, 2, 5).contains("until you reach 500g total"));
    }

    #[test]
    fn aeropress_for_two() {
        assert!(instruction(BrewMethod::AeroPress, 2, 3).starts_with("Add 30g of"));
        assert!(instruction(BrewMethod::AeroPress, 2, 4).contains("pour 60g of water"));
        assert!(instruction(BrewMethod::AeroPress, 2, 5).contains("up to 450g total"));
    }

    #[test]
    fn espresso_double_keeps_dose_and_yield_apart() {
        // Base yield equals the base bloom value (36g); a double must still dose 36g.
        assert_eq!(
            instruction(BrewMethod::Espresso, 2, 2),
            "Grind and dose 36g of finely ground coffee into the dry portafilter basket."
        );
        assert!(instruction(BrewMethod::Espresso, 2, 4).contains("Stop at 72g of espresso"));
    }

    #[test]
    fn cold_brew_for_six() {
        assert_eq!(
            instruction(BrewMethod::ColdBrew, 6, 1),
            "Grind 150g of coffee extra coarse, about the size of peppercorns."
        );
        assert!(instruction(BrewMethod::ColdBrew, 6, 2).contains("pour in 1200g of cold"));
        assert!(guide_for(BrewMethod::ColdBrew).unwrap().steps_for_servings(1).is_err());
    }

    #[test]
    fn moka_pot_for_four() {
        assert!(instruction(BrewMethod::MokaPot, 4, 1).contains("with 360g of just-boiled water"));
        assert!(instruction(BrewMethod::MokaPot, 4, 2).contains("with 36g of fine coffee"));
    }

    #[test]
    fn scaled_view_carries_recipe_and_timers() {
        let scaled = guide_for(BrewMethod::Chemex).unwrap().scaled(3).unwrap();
        assert_eq!(scaled.recipe.coffee_grams, 45);
        assert_eq!(scaled.recipe.water_grams, 720);
        assert_eq!(scaled.steps[3].timer_seconds, Some(45));
        assert_eq!(scaled.steps[3].timer_label, Some("Bloom Phase"));
        assert_eq!(guide_for(BrewMethod::Chemex).unwrap().timed_seconds(), 315);
    }
}
