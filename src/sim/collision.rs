//! Laser-versus-ship collision resolution
//!
//! All collision in this game is axis-aligned rectangle overlap: a laser
//! that overlaps its target ship is consumed and costs the ship one shield
//! point. Each laser can hit at most once (removal and damage happen in the
//! same pass).

use super::state::{Laser, Ship};

/// Run one collision pass of `lasers` against `target`.
///
/// Every overlapping laser is removed from the collection and charged to the
/// ship's shield. Iteration is insertion order; the returned count is the
/// number of bolts consumed this pass.
pub fn resolve_laser_hits(lasers: &mut Vec<Laser>, target: &mut Ship) -> usize {
    let before = lasers.len();
    lasers.retain(|laser| {
        if target.intersects(&laser.bounds) {
            target.take_hit();
            false
        } else {
            true
        }
    });
    before - lasers.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Heading, LaserSpec, ShipKind};
    use glam::Vec2;

    fn target_ship(shield: u32) -> Ship {
        Ship::new(
            ShipKind::Enemy,
            Vec2::new(36.0, 96.0),
            10.0,
            2.0,
            shield,
            LaserSpec {
                width: 0.3,
                height: 5.0,
                speed: 50.0,
                cooldown: 0.8,
            },
        )
    }

    fn laser_at(cx: f32, y: f32) -> Laser {
        Laser::new(cx, y, 0.4, 4.0, 45.0, Heading::Up)
    }

    #[test]
    fn test_hit_consumes_laser_and_shield() {
        let mut ship = target_ship(3);
        let mut lasers = vec![laser_at(36.0, 94.0)];

        let hits = resolve_laser_hits(&mut lasers, &mut ship);
        assert_eq!(hits, 1);
        assert!(lasers.is_empty());
        assert_eq!(ship.shield, 2);
    }

    #[test]
    fn test_miss_keeps_laser() {
        let mut ship = target_ship(3);
        let mut lasers = vec![laser_at(5.0, 10.0)];

        let hits = resolve_laser_hits(&mut lasers, &mut ship);
        assert_eq!(hits, 0);
        assert_eq!(lasers.len(), 1);
        assert_eq!(ship.shield, 3);
    }

    #[test]
    fn test_two_hits_one_frame_shield_one() {
        // Both bolts land in the same pass; shield ends at 0, never negative
        let mut ship = target_ship(1);
        let mut lasers = vec![laser_at(33.0, 95.0), laser_at(39.0, 95.0)];

        let hits = resolve_laser_hits(&mut lasers, &mut ship);
        assert_eq!(hits, 2, "both lasers consumed even past depletion");
        assert!(lasers.is_empty());
        assert_eq!(ship.shield, 0);
    }

    #[test]
    fn test_mixed_pass_removes_only_overlapping() {
        let mut ship = target_ship(3);
        let mut lasers = vec![
            laser_at(36.0, 94.0), // hit
            laser_at(36.0, 20.0), // in flight below
            laser_at(34.0, 95.0), // hit
        ];

        let hits = resolve_laser_hits(&mut lasers, &mut ship);
        assert_eq!(hits, 2);
        assert_eq!(lasers.len(), 1);
        assert_eq!(ship.shield, 1);
        // Insertion order preserved for the survivor
        assert!((lasers[0].bounds.y - 20.0).abs() < 1e-5);
    }
}
