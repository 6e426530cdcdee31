//! Simulation system
//!
//! The player, the trains and the per-frame movement update, plus the
//! [`Simulation`](traits::Simulation) trait and the manager that steps it.

pub mod colony;
pub mod controller;
pub mod manager;
pub mod player;
pub mod state;
pub mod traits;
pub mod vehicle;
