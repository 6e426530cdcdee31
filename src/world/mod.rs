//! # World Assembly
//!
//! Builds the static collision set and the train registry before simulation
//! starts. Nothing here runs per frame: once [`WorldBuilder::build`] returns,
//! obstacle boxes are fixed and the trains are handed to the simulation.
//!
//! ## Layout
//!
//! - Four straight track lines, two running along Z and two along X, with
//!   evenly spaced trains on each.
//! - Four colony districts of base modules, jittered around their centres.
//! - A rock field scattered around the spawn, keeping the spawn clearing and
//!   the track corridors free.
//! - Two landmarks: the radar mast and the hangar.
//!
//! Placement is seeded, so the same config always produces the same world.
//!
//! ```rust
//! use colony_explorer::config::ExplorerConfig;
//! use colony_explorer::world::WorldBuilder;
//!
//! let config = ExplorerConfig::default();
//! let world = WorldBuilder::new(&config).with_rock_count(0).build();
//! assert_eq!(world.vehicles.len(), 12);
//! ```

use cgmath::{Matrix4, Rad, Vector3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::PI;

use crate::config::{ExplorerConfig, TrackLine, VehicleConfig, WorldConfig};
use crate::gfx::collision::{Aabb, Obstacle};
use crate::simulation::vehicle::{TravelAxis, Vehicle};

/// Colony district centres on the ground plane
const DISTRICTS: [(f32, f32); 4] = [
    (-30.0, -160.0),
    (-30.0, 160.0),
    (160.0, 30.0),
    (-160.0, 30.0),
];
const BASES_PER_DISTRICT: usize = 4;
const DISTRICT_JITTER: f32 = 30.0;
const BASE_SCALE: f32 = 5.0;

const RADAR_POSITION: [f32; 3] = [-40.0, 0.0, 40.0];
const RADAR_SCALE: f32 = 10.0;
const HANGAR_POSITION: [f32; 3] = [0.0, 0.0, 0.0];
const HANGAR_SCALE: f32 = 8.0;

/// Unscaled model bounds for each prop, feet at y = 0
#[derive(Debug, Clone, Copy)]
pub enum Prop {
    BaseModule,
    Rock,
    Radar,
    Hangar,
}

impl Prop {
    pub fn local_bounds(self) -> Aabb {
        let (half_width, height) = match self {
            Prop::BaseModule => (1.0, 1.0),
            Prop::Rock => (0.5, 0.6),
            Prop::Radar => (0.5, 1.5),
            Prop::Hangar => (1.5, 2.0),
        };
        Aabb::new(
            Vector3::new(-half_width, 0.0, -half_width),
            Vector3::new(half_width, height, half_width),
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Prop::BaseModule => "base",
            Prop::Rock => "rock",
            Prop::Radar => "radar",
            Prop::Hangar => "hangar",
        }
    }

    /// World bounds of this prop placed with the given transform
    pub fn place(self, position: Vector3<f32>, yaw: f32, scale: f32) -> Obstacle {
        let transform = Matrix4::from_translation(position)
            * Matrix4::from_angle_y(Rad(yaw))
            * Matrix4::from_scale(scale);
        Obstacle::new(self.label(), self.local_bounds().transform(&transform))
    }
}

/// Everything the simulation needs from world construction
#[derive(Debug, Clone, Default)]
pub struct World {
    pub obstacles: Vec<Obstacle>,
    pub vehicles: Vec<Vehicle>,
}

impl World {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of obstacles carrying `label`
    pub fn count(&self, label: &str) -> usize {
        self.obstacles.iter().filter(|o| o.label == label).count()
    }
}

/// Builder for the colony world
pub struct WorldBuilder {
    world: WorldConfig,
    vehicles: VehicleConfig,
    with_landmarks: bool,
}

impl WorldBuilder {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            world: config.world.clone(),
            vehicles: config.vehicles.clone(),
            with_landmarks: true,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.world.seed = seed;
        self
    }

    pub fn with_rock_count(mut self, count: usize) -> Self {
        self.world.rock_count = count;
        self
    }

    pub fn with_lines(mut self, lines: Vec<TrackLine>) -> Self {
        self.world.lines = lines;
        self
    }

    /// Leave out the radar and hangar
    pub fn without_landmarks(mut self) -> Self {
        self.with_landmarks = false;
        self
    }

    pub fn build(self) -> World {
        let mut rng = StdRng::seed_from_u64(self.world.seed);
        let mut world = World::empty();

        world.vehicles = self.spawn_trains();
        self.place_colony(&mut rng, &mut world.obstacles);
        self.scatter_rocks(&mut rng, &mut world.obstacles);
        if self.with_landmarks {
            let radar = Prop::Radar.place(Vector3::from(RADAR_POSITION), 0.0, RADAR_SCALE);
            let hangar = Prop::Hangar.place(Vector3::from(HANGAR_POSITION), 0.0, HANGAR_SCALE);
            world.obstacles.push(radar);
            world.obstacles.push(hangar);
        }

        log::info!(
            "World built: {} obstacles ({} bases, {} rocks), {} trains on {} lines",
            world.obstacles.len(),
            world.count(Prop::BaseModule.label()),
            world.count(Prop::Rock.label()),
            world.vehicles.len(),
            self.world.lines.len()
        );

        world
    }

    fn spawn_trains(&self) -> Vec<Vehicle> {
        let mut trains = Vec::with_capacity(self.world.lines.len() * self.world.trains_per_line);

        for line in &self.world.lines {
            let Some(axis) = TravelAxis::from_char(line.axis) else {
                log::warn!("Skipping track line with unknown axis {:?}", line.axis);
                continue;
            };
            let speed = self.vehicles.train_speed * f32::from(line.direction);

            for i in 0..self.world.trains_per_line {
                let along = self.world.first_train_offset + i as f32 * self.world.train_spacing;
                let position = match axis {
                    TravelAxis::Z => Vector3::new(line.offset, self.vehicles.train_height, along),
                    TravelAxis::X => Vector3::new(along, self.vehicles.train_height, line.offset),
                };
                trains.push(Vehicle::new(position, axis, speed));
            }
        }

        trains
    }

    fn place_colony(&self, rng: &mut StdRng, obstacles: &mut Vec<Obstacle>) {
        for (cx, cz) in DISTRICTS {
            for _ in 0..BASES_PER_DISTRICT {
                let x = cx + rng.random_range(-DISTRICT_JITTER..DISTRICT_JITTER);
                let z = cz + rng.random_range(-DISTRICT_JITTER..DISTRICT_JITTER);
                let yaw = rng.random::<f32>() * PI;
                obstacles.push(Prop::BaseModule.place(Vector3::new(x, 0.0, z), yaw, BASE_SCALE));
            }
        }
    }

    fn scatter_rocks(&self, rng: &mut StdRng, obstacles: &mut Vec<Obstacle>) {
        let half = self.world.rock_field_half_size;
        if !(half > 0.0) || !half.is_finite() {
            log::warn!("Rock field half-size {half} leaves no room for rocks");
            return;
        }
        let mut skipped = 0;

        for _ in 0..self.world.rock_count {
            let x = rng.random_range(-half..half);
            let z = rng.random_range(-half..half);
            let scale = rng.random::<f32>() * 5.0 + 1.0;
            let yaw = rng.random::<f32>() * PI;

            if !self.rock_allowed(x, z) {
                skipped += 1;
                continue;
            }
            obstacles.push(Prop::Rock.place(Vector3::new(x, 0.0, z), yaw, scale));
        }

        log::debug!("Rock scatter skipped {skipped} positions in clearings or corridors");
    }

    /// Rocks stay out of the spawn clearing and off the tracks
    pub fn rock_allowed(&self, x: f32, z: f32) -> bool {
        let clearing = self.world.spawn_clearing;
        if x.abs() < clearing && z.abs() < clearing {
            return false;
        }

        // Only corridors around configured lines are kept clear, not whole
        // bands where no track runs
        let corridor = self.world.track_corridor;
        !self.world.lines.iter().any(|line| {
            let across = match TravelAxis::from_char(line.axis) {
                Some(TravelAxis::Z) => x,
                Some(TravelAxis::X) => z,
                None => return false,
            };
            (across - line.offset).abs() < corridor
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExplorerConfig {
        ExplorerConfig::default()
    }

    #[test]
    fn test_trains_per_line() {
        let world = WorldBuilder::new(&config()).with_rock_count(0).build();
        assert_eq!(world.vehicles.len(), 12);

        let first = &world.vehicles[0];
        assert_eq!(first.axis, TravelAxis::Z);
        assert_eq!(first.position, Vector3::new(-70.0, 0.8, -1000.0));
        assert_eq!(first.speed, 40.0);

        let reversed_x = &world.vehicles[11];
        assert_eq!(reversed_x.axis, TravelAxis::X);
        assert_eq!(reversed_x.position, Vector3::new(600.0, 0.8, 70.0));
        assert_eq!(reversed_x.speed, -40.0);
        assert!(world.vehicles.iter().all(|v| !v.stopped && !v.hailed));
    }

    #[test]
    fn test_custom_lines() {
        let world = WorldBuilder::new(&config())
            .with_rock_count(0)
            .with_lines(vec![
                TrackLine {
                    axis: 'x',
                    offset: -20.0,
                    direction: -1,
                },
                TrackLine {
                    axis: 'q',
                    offset: 0.0,
                    direction: 1,
                },
            ])
            .build();

        assert_eq!(world.vehicles.len(), 3);
        assert!(world.vehicles.iter().all(|v| v.axis == TravelAxis::X && v.speed == -40.0));
        assert_eq!(world.vehicles[1].position, Vector3::new(-200.0, 0.8, -20.0));
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = WorldBuilder::new(&config()).with_seed(42).build();
        let b = WorldBuilder::new(&config()).with_seed(42).build();
        let c = WorldBuilder::new(&config()).with_seed(43).build();

        assert_eq!(a.obstacles.len(), b.obstacles.len());
        for (x, y) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(x.bounds(), y.bounds());
        }
        let differs = a.obstacles.len() != c.obstacles.len()
            || a.obstacles.iter().zip(&c.obstacles).any(|(x, y)| x.bounds() != y.bounds());
        assert!(differs);
    }

    #[test]
    fn test_rocks_avoid_clearing_and_tracks() {
        let cfg = config();
        let world = WorldBuilder::new(&cfg).build();

        assert!(world.count("rock") > 0);
        assert!(world.count("rock") <= cfg.world.rock_count);
        for rock in world.obstacles.iter().filter(|o| o.label == "rock") {
            let c = rock.bounds().center();
            // Centre is the placement point up to float error
            assert!(!(c.x.abs() < 49.0 && c.z.abs() < 49.0));
            assert!((c.x + 70.0).abs() >= 9.0 && (c.x + 90.0).abs() >= 9.0);
            assert!((c.z - 50.0).abs() >= 9.0 && (c.z - 70.0).abs() >= 9.0);
        }
    }

    #[test]
    fn test_rock_allowed_rules() {
        let builder = WorldBuilder::new(&config());
        assert!(!builder.rock_allowed(10.0, -20.0));
        assert!(!builder.rock_allowed(-72.0, 300.0));
        assert!(!builder.rock_allowed(300.0, 55.0));
        assert!(builder.rock_allowed(300.0, 300.0));
        assert!(builder.rock_allowed(-120.0, 0.0));
    }

    #[test]
    fn test_colony_and_landmarks() {
        let world = WorldBuilder::new(&config()).with_rock_count(0).build();
        assert_eq!(world.count("base"), 16);
        assert_eq!(world.count("radar"), 1);
        assert_eq!(world.count("hangar"), 1);

        let hangar = world.obstacles.iter().find(|o| o.label == "hangar").unwrap();
        assert_eq!(hangar.bounds().max.x, 12.0);
        assert_eq!(hangar.bounds().max.y, 16.0);

        let bare = WorldBuilder::new(&config()).with_rock_count(0).without_landmarks().build();
        assert_eq!(bare.obstacles.len(), 16);
    }

    #[test]
    fn test_empty_rock_field_scatters_nothing() {
        for half in [0.0, -50.0, f32::NAN] {
            let mut cfg = config();
            cfg.world.rock_field_half_size = half;
            let world = WorldBuilder::new(&cfg).build();
            assert_eq!(world.count("rock"), 0);
            assert_eq!(world.count("base"), 16);
        }
    }

    #[test]
    fn test_spawn_is_clear() {
        let cfg = config();
        let world = WorldBuilder::new(&cfg).build();
        let probe = Aabb::from_center_size(cfg.player.spawn(), cfg.player.footprint());
        assert!(!crate::gfx::collision::overlaps_any(&probe, &world.obstacles));
    }
}
