//! # Follow Camera
//!
//! Third-person camera that trails the player. The eye sits at a fixed offset
//! in the player's local frame and eases toward it every frame; the look target
//! is a point above the player's feet. Two offsets are available and the
//! toggle-camera action switches between them.

use cgmath::{EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3, VectorSpace};

use crate::config::CameraConfig;
use crate::simulation::player::PlayerState;

/// Which offset the camera trails at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Close behind and above the player.
    #[default]
    Follow,
    /// High up, looking down over the player.
    Overhead,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Follow => CameraMode::Overhead,
            CameraMode::Overhead => CameraMode::Follow,
        }
    }
}

/// View data handed to the renderer
#[derive(Copy, Clone, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    pub view_position: [f32; 4],

    /// Contains the view matrix.
    pub view: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub struct FollowCamera {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    config: CameraConfig,
}

impl FollowCamera {
    pub fn new(config: CameraConfig, initial_eye: Vector3<f32>) -> Self {
        Self {
            eye: initial_eye,
            target: Vector3::new(0.0, 0.0, 0.0),
            config,
        }
    }

    /// Eye offset for `mode`, in the player's local frame
    pub fn offset(&self, mode: CameraMode) -> Vector3<f32> {
        match mode {
            CameraMode::Follow => Vector3::from(self.config.follow_offset),
            CameraMode::Overhead => Vector3::from(self.config.overhead_offset),
        }
    }

    /// Where the eye is heading for this frame
    pub fn desired_eye(&self, player: &PlayerState, mode: CameraMode) -> Vector3<f32> {
        player.position + player.to_world(self.offset(mode))
    }

    /// Ease the eye toward the desired position and re-aim at the player
    pub fn update(&mut self, player: &PlayerState, mode: CameraMode) {
        let desired = self.desired_eye(player, mode);
        self.eye = self.eye.lerp(desired, self.config.smoothing);
        self.target = player.position + Vector3::new(0.0, self.config.look_height, 0.0);
    }

    /// Jump straight to the desired eye, e.g. after a teleport
    pub fn snap(&mut self, player: &PlayerState, mode: CameraMode) {
        self.eye = self.desired_eye(player, mode);
        self.target = player.position + Vector3::new(0.0, self.config.look_height, 0.0);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.target),
            Vector3::unit_y(),
        )
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: [self.eye.x, self.eye.y, self.eye.z, 1.0],
            view: convert_matrix4_to_array(self.view_matrix()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}
