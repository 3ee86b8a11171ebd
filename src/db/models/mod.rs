pub mod customizations;
pub mod entry;

pub use customizations::{
    CoffeeCustomizations, Flavor, FlavorType, FoamLevel, IceAmount, MilkCustomization,
    MilkTemperature, MilkType, Sweetener, SweetenerType,
};
pub use entry::{
    BrewMethod, BrewTime, CoffeeEntry, EntryQuery, EntrySummary, RoastLevel, ServingStyle,
};
