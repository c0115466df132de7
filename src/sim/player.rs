//! Player spacecraft

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAYER_RADIUS, PLAYER_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::Movement;
use crate::palette::{CYAN, RED, WHITE, YELLOW};
use crate::renderer::DrawList;
use crate::wrap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Facing angle (radians), kept from the last non-zero movement
    pub angle: f32,
    /// True iff the ship moved this tick
    pub thrust: bool,
    pub active: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            angle: 0.0,
            thrust: false,
            active: true,
        }
    }

    /// Move by the held directions, wrapping on both axes independently
    pub fn update(&mut self, movement: &Movement, dt: f32) {
        if !self.active {
            self.thrust = false;
            return;
        }
        let delta = movement.direction() * self.speed * dt;

        self.pos.x = wrap(self.pos.x + delta.x, SCREEN_WIDTH);
        self.pos.y = wrap(self.pos.y + delta.y, SCREEN_HEIGHT);

        if delta != Vec2::ZERO {
            self.angle = delta.y.atan2(delta.x);
            self.thrust = true;
        } else {
            self.thrust = false;
        }
    }

    pub fn render(&self, out: &mut DrawList) {
        if !self.active {
            return;
        }
        out.circle(self.pos, self.radius, CYAN, 1.0);
        out.ring(self.pos, self.radius, 2.0, WHITE);

        let facing = Vec2::from_angle(self.angle);
        out.line(self.pos, self.pos + facing * (self.radius + 10.0), 3.0, YELLOW);

        if self.thrust {
            out.circle(self.pos - facing * (self.radius + 5.0), 5.0, RED, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyEvent};

    fn held(keys: &[Key]) -> Movement {
        let mut m = Movement::default();
        for &k in keys {
            m.apply(&KeyEvent::press(k));
        }
        m
    }

    #[test]
    fn test_moves_and_faces_direction() {
        let mut player = Player::new(Vec2::new(500.0, 400.0));
        player.update(&held(&[Key::Right, Key::Down]), 0.5);
        assert_eq!(player.pos, Vec2::new(600.0, 500.0));
        assert!((player.angle - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
        assert!(player.thrust);
    }

    #[test]
    fn test_idle_keeps_angle_clears_thrust() {
        let mut player = Player::new(Vec2::new(500.0, 400.0));
        player.update(&held(&[Key::Up]), 0.1);
        let angle = player.angle;
        player.update(&Movement::default(), 0.1);
        assert!(!player.thrust);
        assert_eq!(player.angle, angle);
    }

    #[test]
    fn test_inactive_player_ignores_input() {
        let mut player = Player::new(Vec2::new(500.0, 400.0));
        player.active = false;
        player.update(&held(&[Key::Left]), 0.5);
        assert_eq!(player.pos, Vec2::new(500.0, 400.0));
        assert!(!player.thrust);
    }

    #[test]
    fn test_wraps_each_axis() {
        let mut player = Player::new(Vec2::new(SCREEN_WIDTH - 10.0, 5.0));
        player.update(&held(&[Key::Right, Key::Up]), 0.1);
        assert!((player.pos.x - 10.0).abs() < 1e-3);
        assert!((player.pos.y - (SCREEN_HEIGHT - 15.0)).abs() < 1e-3);
    }
}
