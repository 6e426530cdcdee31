//! Trains running on straight looping tracks.
//!
//! A vehicle moves along a single horizontal axis. Tracks are closed loops
//! without a modelled far end: once a train passes the track half-length it
//! re-enters at the mirrored coordinate.

use cgmath::Vector3;
use std::f32::consts::{FRAC_PI_2, PI};

/// Horizontal axis a vehicle travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelAxis {
    X,
    Z,
}

impl TravelAxis {
    pub fn from_char(axis: char) -> Option<Self> {
        match axis {
            'x' | 'X' => Some(TravelAxis::X),
            'z' | 'Z' => Some(TravelAxis::Z),
            _ => None,
        }
    }

    /// Coordinate along this axis
    pub fn along(self, v: Vector3<f32>) -> f32 {
        match self {
            TravelAxis::X => v.x,
            TravelAxis::Z => v.z,
        }
    }

    /// Coordinate on the other horizontal axis
    pub fn across(self, v: Vector3<f32>) -> f32 {
        match self {
            TravelAxis::X => v.z,
            TravelAxis::Z => v.x,
        }
    }

    fn along_mut(self, v: &mut Vector3<f32>) -> &mut f32 {
        match self {
            TravelAxis::X => &mut v.x,
            TravelAxis::Z => &mut v.z,
        }
    }
}

/// Non-owning handle to a vehicle in the simulation's vehicle list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub position: Vector3<f32>,
    pub axis: TravelAxis,
    /// Signed speed; the sign is the travel direction.
    pub speed: f32,
    /// Parked for boarding.
    pub stopped: bool,
    /// A call-to-stop request is pending.
    pub hailed: bool,
}

impl Vehicle {
    pub fn new(position: Vector3<f32>, axis: TravelAxis, speed: f32) -> Self {
        Self {
            position,
            axis,
            speed,
            stopped: false,
            hailed: false,
        }
    }

    /// Move along the track unless parked, wrapping past `reset_limit`
    pub fn advance(&mut self, delta_time: f32, reset_limit: f32) {
        if self.stopped {
            return;
        }
        let coord = self.axis.along_mut(&mut self.position);
        *coord += self.speed * delta_time;
        if coord.abs() > reset_limit {
            *coord = -*coord;
        }
    }

    /// Stop at the player if hailed and close enough
    ///
    /// # Arguments
    /// * `player_position` - Where the player is standing
    /// * `threshold` - Along-track distance counted as arrival
    ///
    /// # Returns
    /// `true` if the vehicle parked this call
    pub fn try_arrive(&mut self, player_position: Vector3<f32>, threshold: f32) -> bool {
        if !self.hailed || self.along_track_distance(player_position) >= threshold {
            return false;
        }
        self.set_along(self.axis.along(player_position));
        self.stopped = true;
        self.hailed = false;
        true
    }

    /// Distance to `point` measured along the track
    pub fn along_track_distance(&self, point: Vector3<f32>) -> f32 {
        (self.axis.along(self.position) - self.axis.along(point)).abs()
    }

    /// Distance from `point` to this vehicle's track line
    pub fn cross_track_distance(&self, point: Vector3<f32>) -> f32 {
        (self.axis.across(self.position) - self.axis.across(point)).abs()
    }

    pub fn set_along(&mut self, value: f32) {
        *self.axis.along_mut(&mut self.position) = value;
    }

    /// Travel direction as -1, 0 or 1
    pub fn direction(&self) -> f32 {
        if self.speed == 0.0 {
            0.0
        } else {
            self.speed.signum()
        }
    }

    /// Yaw the model should face, in radians
    pub fn heading(&self) -> f32 {
        match (self.axis, self.direction() < 0.0) {
            (TravelAxis::Z, false) => 0.0,
            (TravelAxis::Z, true) => PI,
            (TravelAxis::X, false) => FRAC_PI_2,
            (TravelAxis::X, true) => -FRAC_PI_2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_along_axis_only() {
        let mut v = Vehicle::new(Vector3::new(50.0, 0.8, 10.0), TravelAxis::X, -40.0);
        v.advance(0.5, 2000.0);
        assert_eq!(v.position, Vector3::new(30.0, 0.8, 10.0));
    }

    #[test]
    fn test_wrap_negates_past_limit() {
        let mut v = Vehicle::new(Vector3::new(-70.0, 0.8, 1999.0), TravelAxis::Z, 40.0);
        v.advance(1.0, 2000.0);
        assert_eq!(v.position.z, -2039.0);

        // Back inside the track on the next frame
        v.advance(1.0, 2000.0);
        assert_eq!(v.position.z, -1999.0);
        assert!(v.position.z.abs() <= 2000.0);
    }

    #[test]
    fn test_stopped_vehicle_holds_position() {
        let mut v = Vehicle::new(Vector3::new(0.0, 0.8, 5.0), TravelAxis::Z, 40.0);
        v.stopped = true;
        v.advance(1.0, 2000.0);
        assert_eq!(v.position.z, 5.0);
    }

    #[test]
    fn test_try_arrive_snaps_to_player() {
        let mut v = Vehicle::new(Vector3::new(-70.0, 0.8, 101.5), TravelAxis::Z, 40.0);
        v.hailed = true;
        let player = Vector3::new(-75.0, 0.0, 100.0);

        assert!(v.try_arrive(player, 2.0));
        assert!(v.stopped);
        assert!(!v.hailed);
        assert_eq!(v.position.z, 100.0);
        assert_eq!(v.position.x, -70.0);
    }

    #[test]
    fn test_try_arrive_requires_hail() {
        let mut v = Vehicle::new(Vector3::new(0.0, 0.8, 100.0), TravelAxis::Z, 40.0);
        assert!(!v.try_arrive(Vector3::new(0.0, 0.0, 100.0), 2.0));
        assert!(!v.stopped);

        v.hailed = true;
        assert!(!v.try_arrive(Vector3::new(0.0, 0.0, 90.0), 2.0));
        assert!(v.hailed);
    }

    #[test]
    fn test_distances() {
        let v = Vehicle::new(Vector3::new(50.0, 0.8, 70.0), TravelAxis::X, 40.0);
        let p = Vector3::new(10.0, 0.0, 60.0);
        assert_eq!(v.along_track_distance(p), 40.0);
        assert_eq!(v.cross_track_distance(p), 10.0);
    }

    #[test]
    fn test_heading_follows_direction() {
        let north = Vehicle::new(Vector3::new(0.0, 0.0, 0.0), TravelAxis::Z, 40.0);
        let west = Vehicle::new(Vector3::new(0.0, 0.0, 0.0), TravelAxis::X, -40.0);
        assert_eq!(north.heading(), 0.0);
        assert_eq!(west.heading(), -FRAC_PI_2);
        assert_eq!(TravelAxis::from_char('z'), Some(TravelAxis::Z));
        assert_eq!(TravelAxis::from_char('y'), None);
    }
}
