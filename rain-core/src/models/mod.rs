mod harvest_result;
mod input_field;
mod roof_material;

pub use harvest_result::{Equivalences, HarvestResult, SHOWER_LITERS, SavedHarvest, WASH_LOAD_LITERS};
pub use input_field::InputField;
pub use roof_material::RoofMaterial;
