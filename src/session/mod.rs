pub mod navigation;
pub mod quiz;
pub mod result;
pub mod status;
pub mod timer;
