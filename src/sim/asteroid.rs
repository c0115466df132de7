//! Drifting asteroids that can be scanned for minerals

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::palette::{GREEN, WHITE};
use crate::renderer::DrawList;

/// Mineral found by a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mineral {
    Iron,
    Nickel,
    Platinum,
    WaterIce,
}

impl Mineral {
    pub const ALL: [Mineral; 4] = [
        Mineral::Iron,
        Mineral::Nickel,
        Mineral::Platinum,
        Mineral::WaterIce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mineral::Iron => "Iron",
            Mineral::Nickel => "Nickel",
            Mineral::Platinum => "Platinum",
            Mineral::WaterIce => "Water Ice",
        }
    }
}

/// Size class reported by a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Large,
}

impl SizeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Small => "Small",
            SizeClass::Large => "Large",
        }
    }
}

/// Result of a first-time scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub mineral: Mineral,
    pub value: u32,
    pub size: SizeClass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    /// Angular rate (radians/sec)
    pub rotation_speed: f32,
    pub mineral: Mineral,
    pub scanned: bool,
    pub active: bool,
}

impl Asteroid {
    /// Build with an explicit heading; `speed` along `(cos θ, sin θ)`
    pub fn new(pos: Vec2, radius: f32, speed: f32, heading: f32, mineral: Mineral) -> Self {
        Self {
            pos,
            vel: Vec2::from_angle(heading) * speed,
            radius,
            rotation: 0.0,
            rotation_speed: 0.0,
            mineral,
            scanned: false,
            active: true,
        }
    }

    /// Random size, speed, heading, spin and mineral
    pub fn random<R: Rng>(pos: Vec2, rng: &mut R) -> Self {
        let radius = rng.random_range(15..=35) as f32;
        let speed = rng.random_range(20..=60) as f32;
        let heading: f32 = rng.random_range(0.0..TAU);
        let mineral = *Mineral::ALL.choose(rng).unwrap_or(&Mineral::Iron);
        let mut asteroid = Self::new(pos, radius, speed, heading, mineral);
        asteroid.rotation_speed = rng.random_range(-2.0..2.0);
        asteroid
    }

    /// Credits value
    pub fn value(&self) -> u32 {
        (self.radius * 10.0).round() as u32
    }

    pub fn size_class(&self) -> SizeClass {
        if self.radius > 25.0 {
            SizeClass::Large
        } else {
            SizeClass::Small
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.pos += self.vel * dt;
        self.rotation += self.rotation_speed * dt;

        // Re-enter one radius past the opposite edge
        let r = self.radius;
        if self.pos.x < -r {
            self.pos.x = SCREEN_WIDTH + r;
        } else if self.pos.x > SCREEN_WIDTH + r {
            self.pos.x = -r;
        }
        if self.pos.y < -r {
            self.pos.y = SCREEN_HEIGHT + r;
        } else if self.pos.y > SCREEN_HEIGHT + r {
            self.pos.y = -r;
        }
    }

    /// Reveal minerals once; `None` if already scanned
    pub fn scan(&mut self) -> Option<ScanReport> {
        if self.scanned {
            return None;
        }
        self.scanned = true;
        Some(ScanReport {
            mineral: self.mineral,
            value: self.value(),
            size: self.size_class(),
        })
    }

    pub fn render(&self, out: &mut DrawList) {
        if !self.active {
            return;
        }
        let body = if self.scanned {
            [120, 100, 80]
        } else {
            [100, 80, 60]
        };
        out.circle(self.pos, self.radius, body, 1.0);

        for i in 0..3 {
            let offset = Vec2::from_angle(self.rotation + i as f32 * 2.0) * self.radius * 0.3;
            out.circle(self.pos + offset, 3.0, [80, 60, 40], 1.0);
        }

        if self.scanned {
            out.ring(self.pos, self.radius + 5.0, 2.0, GREEN);
            out.text(
                self.pos - Vec2::new(0.0, self.radius + 15.0),
                self.mineral.as_str(),
                20.0,
                WHITE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_scan_once() {
        let mut a = Asteroid::new(Vec2::ZERO, 30.0, 0.0, 0.0, Mineral::Platinum);
        let report = a.scan().expect("first scan reveals");
        assert_eq!(report.mineral, Mineral::Platinum);
        assert_eq!(report.value, 300);
        assert_eq!(report.size, SizeClass::Large);
        assert!(a.scanned);
        assert!(a.scan().is_none());
    }

    #[test]
    fn test_wrap_with_radius_margin() {
        let mut a = Asteroid::new(
            Vec2::new(-19.0, 100.0),
            20.0,
            10.0,
            std::f32::consts::PI,
            Mineral::Iron,
        );
        a.update(0.2);
        assert_eq!(a.pos.x, SCREEN_WIDTH + 20.0);

        let mut b = Asteroid::new(
            Vec2::new(100.0, SCREEN_HEIGHT + 19.0),
            20.0,
            10.0,
            std::f32::consts::FRAC_PI_2,
            Mineral::Iron,
        );
        b.update(0.2);
        assert_eq!(b.pos.y, -20.0);
    }

    #[test]
    fn test_random_is_seeded_and_in_range() {
        let mut r1 = Pcg32::seed_from_u64(9);
        let mut r2 = Pcg32::seed_from_u64(9);
        for _ in 0..20 {
            let a = Asteroid::random(Vec2::ZERO, &mut r1);
            let b = Asteroid::random(Vec2::ZERO, &mut r2);
            assert_eq!(a.vel, b.vel);
            assert_eq!(a.mineral, b.mineral);
            assert!((15.0..=35.0).contains(&a.radius));
            let speed = a.vel.length();
            assert!((19.99..=60.01).contains(&speed));
            assert!((-2.0..2.0).contains(&a.rotation_speed));
        }
    }

    #[test]
    fn test_inactive_asteroid_holds_still() {
        let mut a = Asteroid::new(Vec2::new(500.0, 400.0), 20.0, 40.0, 0.0, Mineral::Iron);
        a.active = false;
        a.update(1.0);
        assert_eq!(a.pos, Vec2::new(500.0, 400.0));
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut a = Asteroid::new(Vec2::new(500.0, 400.0), 20.0, 0.0, 0.0, Mineral::Nickel);
        a.rotation_speed = 1.5;
        a.update(0.5);
        a.update(0.5);
        assert!((a.rotation - 1.5).abs() < 1e-5);
    }
}
