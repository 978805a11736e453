pub mod calculator_session;
pub mod catalog_service;
pub mod estimator;
