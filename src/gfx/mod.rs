//! # Graphics-Side State
//!
//! Everything a renderer reads from the explorer without the explorer doing
//! any drawing itself:
//!
//! - **Collision volumes** ([`collision`]) - axis-aligned boxes for props and the player footprint
//! - **Camera** ([`camera`]) - third-person follow camera and its view matrix
//! - **Animation** ([`anim`]) - locomotion clip cross-fading

pub mod anim;
pub mod camera;
pub mod collision;

// Re-export commonly used types
pub use camera::{CameraMode, FollowCamera};
pub use collision::{Aabb, Obstacle};
