// OilLog - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: ui, platform, app, or touch the filesystem.

pub mod estimator;
pub mod export;
pub mod model;
pub mod parser;
