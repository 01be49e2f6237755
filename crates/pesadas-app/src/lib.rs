//! Application service layer - config, storage wiring, view controller

pub mod config;
pub mod logging;
pub mod repository;
pub mod view;
