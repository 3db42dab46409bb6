// OilLog - app/mod.rs
//
// Application layer: orchestration, state management, session persistence.
// Dependencies: core, platform.
// Must NOT depend on: ui.

pub mod maintenance;
pub mod session;
pub mod state;
