pub mod catalog;
pub mod simulation;
