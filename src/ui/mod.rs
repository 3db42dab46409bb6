// OilLog - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: core (read-only models).
// Must NOT depend on: platform, direct I/O beyond the writer it is given.

pub mod report;
