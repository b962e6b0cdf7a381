//! Fixed timestep simulation tick
//!
//! One tick runs the whole frame sequence in a fixed order: player steering,
//! enemy steering, firing timers, backdrop scroll, volley spawning, laser
//! flight and culling, then the collision pass. Deterministic given input,
//! seed, and dt.

use glam::Vec2;

use super::collision::resolve_laser_hits;
use super::state::GameState;
use crate::consts::*;

/// Input sampled for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Directional keys currently held
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Any keyboard key held at all; suppresses touch steering
    pub any_key: bool,
    /// Active touch/pointer position in world coordinates
    pub touch: Option<Vec2>,
}

/// Remaining travel distance to each world edge for a bounding box.
/// Left/down are negative (how far the box may move in -x/-y).
struct EdgeLimits {
    left: f32,
    right: f32,
    down: f32,
    up: f32,
}

impl EdgeLimits {
    fn of(bounds: &super::rect::Rect) -> Self {
        Self {
            left: -bounds.x,
            right: WORLD_WIDTH - bounds.x - bounds.width,
            down: -bounds.y,
            up: WORLD_HEIGHT - bounds.y - bounds.height,
        }
    }

    /// Clamp a requested move so the box edge lands exactly on the boundary
    fn clamp(&self, dx: f32, dy: f32) -> (f32, f32) {
        let dx = if dx > 0.0 {
            dx.min(self.right)
        } else {
            dx.max(self.left)
        };
        let dy = if dy > 0.0 {
            dy.min(self.up)
        } else {
            dy.max(self.down)
        };
        (dx, dy)
    }
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    steer_player(state, input, dt);
    steer_enemy(state, dt);

    state.player.update(dt);
    state.enemy.update(dt);

    state.backdrop.scroll(dt);

    fire_volleys(state);
    advance_lasers(state, dt);

    let on_enemy = resolve_laser_hits(&mut state.player_lasers, &mut state.enemy);
    let on_player = resolve_laser_hits(&mut state.enemy_lasers, &mut state.player);
    if on_enemy > 0 {
        log::debug!("enemy took {on_enemy} hit(s), shield now {}", state.enemy.shield);
    }
    if on_player > 0 {
        log::debug!("player took {on_player} hit(s), shield now {}", state.player.shield);
    }
}

/// Keyboard and touch steering for the player, clamped to the world
fn steer_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let limits = EdgeLimits::of(&state.player.bounds);
    let step = state.player.movement_speed * dt;

    // Each held key moves independently, clamped to the remaining distance
    if input.right && limits.right > 0.0 {
        state.player.translate(step.min(limits.right), 0.0);
    }
    if input.up && limits.up > 0.0 {
        state.player.translate(0.0, step.min(limits.up));
    }
    if input.left && limits.left < 0.0 {
        state.player.translate((-step).max(limits.left), 0.0);
    }
    if input.down && limits.down < 0.0 {
        state.player.translate(0.0, (-step).max(limits.down));
    }

    // Touch steering only when the keyboard is idle
    if input.any_key {
        return;
    }
    if let Some(touch) = input.touch {
        let centre = state.player.bounds.center();
        let delta = touch - centre;
        let distance = delta.length();

        if distance > TOUCH_DEAD_ZONE {
            let request = delta / distance * step;
            let (dx, dy) = limits.clamp(request.x, request.y);
            state.player.translate(dx, dy);
        }
    }
}

/// Enemy wander: hold the current direction until the retarget countdown
/// expires, then draw a fresh one from the seeded RNG
fn steer_enemy(state: &mut GameState, dt: f32) {
    if state.steering.retarget_ticks == 0 {
        let mut rng = state.rng_state.rng_at(state.time_ticks);
        state.steering.retarget(&mut rng);
        log::trace!("enemy steering retarget: {:?}", state.steering.direction);
    }
    state.steering.retarget_ticks -= 1;

    let limits = EdgeLimits::of(&state.enemy.bounds);
    let request = state.steering.direction * state.enemy.movement_speed * dt;
    let (dx, dy) = limits.clamp(request.x, request.y);
    state.enemy.translate(dx, dy);
}

/// Spawn volleys for every ship whose cadence has elapsed. Fired lasers
/// transfer straight into the orchestrator's collections.
fn fire_volleys(state: &mut GameState) {
    if state.player.can_fire() {
        let volley = state.player.fire_lasers();
        state.player_lasers.extend(volley);
    }
    if state.enemy.can_fire() {
        let volley = state.enemy.fire_lasers();
        state.enemy_lasers.extend(volley);
    }
}

/// Advance every laser and cull the ones that left the world, in one pass
fn advance_lasers(state: &mut GameState, dt: f32) {
    for lasers in [&mut state.player_lasers, &mut state.enemy_lasers] {
        lasers.retain_mut(|laser| {
            laser.advance(dt);
            !laser.off_world()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Heading, Laser};
    use proptest::prelude::*;

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_rightward_move_clamped_to_world_edge() {
        // Player at x=30, width 10, speed 50, dt=1: request 50, clamped to
        // 72-30-10=32, landing exactly on the right edge at x=62.
        let mut state = GameState::new(1);
        state.player.bounds.x = 30.0;
        state.player.movement_speed = 50.0;

        let input = TickInput {
            right: true,
            any_key: true,
            ..idle()
        };
        tick(&mut state, &input, 1.0);

        assert!((state.player.bounds.x - 62.0).abs() < 1e-4);
        assert!((state.player.bounds.x + state.player.bounds.width - WORLD_WIDTH).abs() < 1e-4);
    }

    #[test]
    fn test_leftward_move_clamped_at_origin() {
        let mut state = GameState::new(1);
        state.player.bounds.x = 3.0;
        state.player.movement_speed = 50.0;

        let input = TickInput {
            left: true,
            any_key: true,
            ..idle()
        };
        tick(&mut state, &input, 1.0);

        assert!(state.player.bounds.x.abs() < 1e-4, "edge lands on the boundary");
    }

    #[test]
    fn test_touch_inside_dead_zone_is_ignored() {
        let mut state = GameState::new(1);
        let centre = state.player.bounds.center();
        let before = state.player.bounds;

        let input = TickInput {
            touch: Some(centre + Vec2::new(0.3, 0.0)),
            ..idle()
        };
        tick(&mut state, &input, 1.0 / 60.0);

        assert_eq!(state.player.bounds, before);
    }

    #[test]
    fn test_touch_suppressed_while_key_held() {
        let mut state = GameState::new(1);
        let before_y = state.player.bounds.y;

        let input = TickInput {
            any_key: true,
            touch: Some(Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)),
            ..idle()
        };
        tick(&mut state, &input, 1.0 / 60.0);

        assert_eq!(state.player.bounds.y, before_y);
    }

    #[test]
    fn test_touch_steers_toward_point() {
        let mut state = GameState::new(1);
        let centre = state.player.bounds.center();
        let target = centre + Vec2::new(10.0, 0.0);

        let input = TickInput {
            touch: Some(target),
            ..idle()
        };
        let dt = 1.0 / 60.0;
        tick(&mut state, &input, dt);

        let moved = state.player.bounds.center() - centre;
        let expected = state.player.movement_speed * dt;
        assert!((moved.x - expected).abs() < 1e-4);
        assert!(moved.y.abs() < 1e-4);
    }

    #[test]
    fn test_volleys_fire_on_cadence() {
        let mut state = GameState::new(1);

        // Player cadence is 0.5 s, enemy 0.8 s
        tick(&mut state, &idle(), 0.5);
        assert_eq!(state.player_lasers.len(), 1);
        assert_eq!(state.enemy_lasers.len(), 0);

        tick(&mut state, &idle(), 0.3);
        assert_eq!(state.player_lasers.len(), 1, "timer reset on fire");
        assert_eq!(state.enemy_lasers.len(), 2, "twin volley at 0.8 s");
    }

    #[test]
    fn test_laser_culled_when_exiting_world() {
        let mut state = GameState::new(1);
        state
            .player_lasers
            .push(Laser::new(5.0, WORLD_HEIGHT - 1.0, 0.4, 4.0, 45.0, Heading::Up));

        // Advancing 45 * 0.1 = 4.5 pushes y past the world top
        tick(&mut state, &idle(), 0.1);
        assert!(
            !state.player_lasers.iter().any(|l| l.off_world()),
            "no off-world laser survives the tick"
        );
        assert!(state.player_lasers.is_empty());
    }

    #[test]
    fn test_hit_consumed_same_frame() {
        let mut state = GameState::new(1);
        state.enemy.shield = 1;
        let enemy_centre = state.enemy.bounds.center();

        // Two bolts just below the enemy hull, one tick from contact
        for dx in [-2.0, 2.0] {
            state.player_lasers.push(Laser::new(
                enemy_centre.x + dx,
                state.enemy.bounds.y - 4.2,
                0.4,
                4.0,
                45.0,
                Heading::Up,
            ));
        }

        tick(&mut state, &idle(), 1.0 / 100.0);
        assert!(state.player_lasers.is_empty(), "both bolts consumed");
        assert_eq!(state.enemy.shield, 0, "shield floors at zero");
    }

    #[test]
    fn test_tick_is_deterministic() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        let input = TickInput {
            right: true,
            any_key: true,
            ..idle()
        };

        for _ in 0..240 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }

        let ja = serde_json::to_string(&a).unwrap();
        let jb = serde_json::to_string(&b).unwrap();
        assert_eq!(ja, jb);
    }

    fn in_world(bounds: &crate::sim::rect::Rect) -> bool {
        bounds.x >= -1e-3
            && bounds.y >= -1e-3
            && bounds.x + bounds.width <= WORLD_WIDTH + 1e-3
            && bounds.y + bounds.height <= WORLD_HEIGHT + 1e-3
    }

    proptest! {
        #[test]
        fn prop_player_never_leaves_world(
            seed in any::<u64>(),
            moves in proptest::collection::vec((any::<u8>(), 0.0f32..0.1), 1..100),
        ) {
            let mut state = GameState::new(seed);
            for (keys, dt) in moves {
                let input = TickInput {
                    left: keys & 1 != 0,
                    right: keys & 2 != 0,
                    up: keys & 4 != 0,
                    down: keys & 8 != 0,
                    any_key: keys != 0,
                    touch: None,
                };
                tick(&mut state, &input, dt);
                prop_assert!(in_world(&state.player.bounds));
            }
        }

        #[test]
        fn prop_touch_never_drags_player_out(
            seed in any::<u64>(),
            tx in -50.0f32..150.0,
            ty in -50.0f32..200.0,
            ticks in 1usize..200,
        ) {
            // Touch points may lie outside the world; clamping still holds
            let mut state = GameState::new(seed);
            let input = TickInput {
                touch: Some(Vec2::new(tx, ty)),
                ..TickInput::default()
            };
            for _ in 0..ticks {
                tick(&mut state, &input, SIM_DT);
                prop_assert!(in_world(&state.player.bounds));
            }
        }

        #[test]
        fn prop_enemy_wander_stays_in_world(seed in any::<u64>(), ticks in 1usize..600) {
            let mut state = GameState::new(seed);
            for _ in 0..ticks {
                tick(&mut state, &TickInput::default(), SIM_DT);
                prop_assert!(in_world(&state.enemy.bounds));
            }
        }

        #[test]
        fn prop_shield_is_monotonic_non_increasing(
            seed in any::<u64>(),
            ticks in 1usize..400,
        ) {
            let mut state = GameState::new(seed);
            let mut last = state.player.shield;
            for _ in 0..ticks {
                tick(&mut state, &TickInput::default(), SIM_DT);
                prop_assert!(state.player.shield <= last);
                last = state.player.shield;
            }
        }
    }
}
