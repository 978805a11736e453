pub mod catalog_controller;
pub mod simulation_controller;
