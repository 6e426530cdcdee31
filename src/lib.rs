// src/lib.rs
//! Colony Explorer
//!
//! Player and train movement for a third-person walk around a Mars colony:
//! jetpack physics, box collision against static props, trains on looping
//! tracks that can be hailed and boarded, and a follow camera.

pub mod app;
pub mod assets;
pub mod config;
pub mod gfx;
pub mod input;
pub mod performance;
pub mod prelude;
pub mod simulation;
pub mod world;

// Re-export main types for convenience
pub use app::ExplorerApp;
pub use config::ExplorerConfig;

/// Creates an explorer with the default colony
pub fn default() -> ExplorerApp {
    ExplorerApp::new(ExplorerConfig::default())
}
