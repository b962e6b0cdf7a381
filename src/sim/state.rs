//! Game state and core simulation types
//!
//! Everything needed to advance a frame deterministically lives here.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Vertical travel direction of a laser, fixed at creation by the firing
/// ship. Stored on the laser itself so nothing has to infer direction from
/// which collection a laser sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Toward increasing y (player fire)
    Up,
    /// Toward decreasing y (enemy fire)
    Down,
}

impl Heading {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Up => 1.0,
            Heading::Down => -1.0,
        }
    }
}

/// A laser bolt in flight. Speed and heading are immutable after
/// construction; only the bounding box moves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Laser {
    pub bounds: Rect,
    pub speed: f32,
    pub heading: Heading,
}

impl Laser {
    /// Spawn a laser centred on `cx`, with its bottom edge at `y`
    pub fn new(cx: f32, y: f32, width: f32, height: f32, speed: f32, heading: Heading) -> Self {
        Self {
            bounds: Rect::new(cx - width / 2.0, y, width, height),
            speed,
            heading,
        }
    }

    /// Advance along the heading by `speed * dt`
    pub fn advance(&mut self, dt: f32) {
        self.bounds = self.bounds.translated(0.0, self.heading.sign() * self.speed * dt);
    }

    /// True once the bolt has fully left the world vertically
    pub fn off_world(&self) -> bool {
        match self.heading {
            Heading::Up => self.bounds.y > WORLD_HEIGHT,
            Heading::Down => self.bounds.y + self.bounds.height < 0.0,
        }
    }
}

/// Parameters of the lasers a ship fires
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaserSpec {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Minimum interval between volleys (seconds)
    pub cooldown: f32,
}

/// Which fire pattern a ship uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipKind {
    /// Single centred cannon, firing upward
    Player,
    /// Twin cannons at 18%/82% of hull width, firing downward
    Enemy,
}

/// A ship: positioned hull, shield counter, and firing cadence state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub kind: ShipKind,
    pub bounds: Rect,
    /// World units per second
    pub movement_speed: f32,
    /// Hit points; each absorbed laser costs one
    pub shield: u32,
    pub laser: LaserSpec,
    /// Accumulated time since the last volley (seconds)
    pub since_last_shot: f32,
}

impl Ship {
    pub fn new(
        kind: ShipKind,
        centre: Vec2,
        size: f32,
        movement_speed: f32,
        shield: u32,
        laser: LaserSpec,
    ) -> Self {
        Self {
            kind,
            bounds: Rect::from_center(centre.x, centre.y, size, size),
            movement_speed,
            shield,
            laser,
            since_last_shot: 0.0,
        }
    }

    /// Advance the firing timer (call once per tick)
    pub fn update(&mut self, dt: f32) {
        self.since_last_shot += dt;
    }

    /// True once the cadence interval has elapsed
    pub fn can_fire(&self) -> bool {
        self.since_last_shot >= self.laser.cooldown
    }

    /// Produce this ship's volley and reset the cadence timer.
    ///
    /// Callers are expected to gate on `can_fire`; the only internal effect
    /// is the timer reset.
    pub fn fire_lasers(&mut self) -> Vec<Laser> {
        self.since_last_shot = 0.0;

        let b = self.bounds;
        let l = self.laser;
        match self.kind {
            ShipKind::Player => {
                // One bolt from the nose, centred on the hull
                vec![Laser::new(
                    b.x + b.width / 2.0,
                    b.y + b.height,
                    l.width,
                    l.height,
                    l.speed,
                    Heading::Up,
                )]
            }
            ShipKind::Enemy => ENEMY_CANNON_OFFSETS
                .iter()
                .map(|frac| {
                    Laser::new(
                        b.x + b.width * frac,
                        b.y - l.height,
                        l.width,
                        l.height,
                        l.speed,
                        Heading::Down,
                    )
                })
                .collect(),
        }
    }

    pub fn intersects(&self, rect: &Rect) -> bool {
        self.bounds.overlaps(rect)
    }

    /// Absorb one hit. A depleted shield is a no-op: ships have no death
    /// state, so a hull with shield 0 simply shrugs the bolt off.
    pub fn take_hit(&mut self) {
        if self.shield > 0 {
            self.shield -= 1;
        } else {
            log::debug!("{:?} ship hit with shield already exhausted", self.kind);
        }
    }

    /// Reposition by the given deltas. No clamping here: callers clamp
    /// against world limits before translating.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.bounds = self.bounds.translated(dx, dy);
    }
}

/// Number of parallax starfield layers
pub const BACKDROP_LAYERS: usize = 4;

/// Per-layer speed divisors, slowest (farthest) first
const LAYER_SPEED_DIVISORS: [f32; BACKDROP_LAYERS] = [8.0, 4.0, 2.0, 1.0];

/// Scroll offsets for the parallax starfield layers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backdrop {
    pub offsets: [f32; BACKDROP_LAYERS],
}

impl Backdrop {
    /// Scroll speed of a layer in world units per second
    pub fn layer_speed(layer: usize) -> f32 {
        BACKDROP_BASE_SPEED / LAYER_SPEED_DIVISORS[layer]
    }

    /// Advance all layers. An offset that already ran past the world height
    /// snaps back to zero before this frame's increment is applied, so each
    /// stored offset stays within one increment of `[0, WORLD_HEIGHT]`.
    pub fn scroll(&mut self, dt: f32) {
        for (layer, offset) in self.offsets.iter_mut().enumerate() {
            if *offset > WORLD_HEIGHT {
                *offset = 0.0;
            }
            *offset += Self::layer_speed(layer) * dt;
        }
    }
}

/// RNG state wrapper: a stored seed plus a tick-derived stream, so any
/// single tick's draws are reproducible without persisting generator guts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generator for draws made during the given tick
    pub fn rng_at(&self, tick: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ tick.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Wander strategy for the enemy ship: hold a direction for a while, then
/// draw a fresh one from the seeded RNG
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Steering {
    /// Current unit direction of travel
    pub direction: Vec2,
    /// Ticks until the next retarget
    pub retarget_ticks: u32,
}

impl Default for Steering {
    fn default() -> Self {
        Self {
            direction: Vec2::new(0.0, -1.0),
            retarget_ticks: 0,
        }
    }
}

impl Steering {
    /// Pick a new direction and hold interval
    pub fn retarget(&mut self, rng: &mut Pcg32) {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        self.direction = Vec2::new(angle.cos(), angle.sin());
        // Hold for 0.75 - 2 seconds
        self.retarget_ticks = rng.random_range(90..240);
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The player's ship
    pub player: Ship,
    /// The opposing ship
    pub enemy: Ship,
    /// In-flight player fire, insertion order
    pub player_lasers: Vec<Laser>,
    /// In-flight enemy fire, insertion order
    pub enemy_lasers: Vec<Laser>,
    /// Parallax scroll offsets
    pub backdrop: Backdrop,
    /// Enemy wander state
    pub steering: Steering,
}

impl GameState {
    /// Create a fresh session: player in the lower half, enemy in the upper
    pub fn new(seed: u64) -> Self {
        let player = Ship::new(
            ShipKind::Player,
            Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 4.0),
            PLAYER_SHIP_SIZE,
            PLAYER_SPEED,
            PLAYER_SHIELD,
            LaserSpec {
                width: PLAYER_LASER_WIDTH,
                height: PLAYER_LASER_HEIGHT,
                speed: PLAYER_LASER_SPEED,
                cooldown: PLAYER_FIRE_COOLDOWN,
            },
        );

        let enemy = Ship::new(
            ShipKind::Enemy,
            Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT * 3.0 / 4.0),
            ENEMY_SHIP_SIZE,
            ENEMY_SPEED,
            ENEMY_SHIELD,
            LaserSpec {
                width: ENEMY_LASER_WIDTH,
                height: ENEMY_LASER_HEIGHT,
                speed: ENEMY_LASER_SPEED,
                cooldown: ENEMY_FIRE_COOLDOWN,
            },
        );

        Self {
            seed,
            rng_state: RngState::new(seed),
            time_ticks: 0,
            player,
            enemy,
            player_lasers: Vec::new(),
            enemy_lasers: Vec::new(),
            backdrop: Backdrop::default(),
            steering: Steering::default(),
        }
    }
}
