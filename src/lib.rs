//! Cathode library
//!
//! Electron-trajectory simulation through a static 2D potential field.
//! This provides the core functionality as a library to enable integration
//! testing.

pub mod cli;
pub mod config;
pub mod output;
pub mod physics;
pub mod prelude;
pub mod resources;
pub mod simulation;
