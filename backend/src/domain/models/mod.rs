pub mod event;
pub mod marketing_material;
