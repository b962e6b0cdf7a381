//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed frame order (movement, firing, flight, collisions)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::resolve_laser_hits;
pub use rect::Rect;
pub use state::{Backdrop, GameState, Heading, Laser, LaserSpec, Ship, ShipKind, Steering};
pub use tick::{TickInput, tick};
