//! Star Volley - a vertically scrolling space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, movement, collisions)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Persisted preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical world size, independent of screen resolution
    pub const WORLD_WIDTH: f32 = 72.0;
    pub const WORLD_HEIGHT: f32 = 128.0;

    /// Minimum distance between a touch point and the ship centre before
    /// touch steering kicks in (world units)
    pub const TOUCH_DEAD_ZONE: f32 = 0.5;

    /// Fastest backdrop layer speed; slower layers divide this down
    pub const BACKDROP_BASE_SPEED: f32 = WORLD_HEIGHT / 4.0;

    /// Player ship tuning
    pub const PLAYER_SPEED: f32 = 48.0;
    pub const PLAYER_SHIELD: u32 = 3;
    pub const PLAYER_SHIP_SIZE: f32 = 10.0;
    pub const PLAYER_LASER_WIDTH: f32 = 0.4;
    pub const PLAYER_LASER_HEIGHT: f32 = 4.0;
    pub const PLAYER_LASER_SPEED: f32 = 45.0;
    pub const PLAYER_FIRE_COOLDOWN: f32 = 0.5;

    /// Enemy ship tuning
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_SHIELD: u32 = 1;
    pub const ENEMY_SHIP_SIZE: f32 = 10.0;
    pub const ENEMY_LASER_WIDTH: f32 = 0.3;
    pub const ENEMY_LASER_HEIGHT: f32 = 5.0;
    pub const ENEMY_LASER_SPEED: f32 = 50.0;
    pub const ENEMY_FIRE_COOLDOWN: f32 = 0.8;

    /// Fraction of ship width where the enemy's twin cannons sit
    pub const ENEMY_CANNON_OFFSETS: [f32; 2] = [0.18, 0.82];
}
