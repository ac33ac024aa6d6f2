pub mod analyze;
pub mod currency;
pub mod goal;
pub mod setup;
pub mod tips;
pub mod ui;
