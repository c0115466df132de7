//! Orbital mechanics for the solar-system explorer
//!
//! Planets circle the sun on fixed radii. Satellites circle Earth's
//! *current* position, so they are re-anchored every tick after the planets
//! move. Both run on time scaled by a user-adjustable factor.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, TIME_SCALE_MAX, TIME_SCALE_MIN};
use crate::orbit_position;
use crate::palette::{BLUE, CYAN, EARTH, GREEN, JUPITER, MARS, PURPLE, RED, WHITE, YELLOW};
use crate::renderer::DrawList;
use crate::sim::planet::Planet;

pub const SUN_RADIUS: f32 = 30.0;
/// Planet angular speeds are in tenths of a radian per scaled second
pub const PLANET_RATE_FACTOR: f32 = 0.1;
/// Satellite angular rate (radians/sec)
pub const SATELLITE_ORBIT_SPEED: f32 = 1.5;
/// Data units gathered per second
pub const SATELLITE_DATA_RATE: f32 = 10.0;
/// Most data a single link can drain
pub const MAX_DATA_PER_LINK: f32 = 100.0;

/// Satellite missions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SatelliteKind {
    Communication,
    Weather,
    Navigation,
    Scientific,
}

impl SatelliteKind {
    pub const ALL: [SatelliteKind; 4] = [
        SatelliteKind::Communication,
        SatelliteKind::Weather,
        SatelliteKind::Navigation,
        SatelliteKind::Scientific,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SatelliteKind::Communication => "CommSat-1",
            SatelliteKind::Weather => "WeatherSat-2",
            SatelliteKind::Navigation => "NavSat-GPS",
            SatelliteKind::Scientific => "SciSat-Hubble",
        }
    }

    pub fn function(&self) -> &'static str {
        match self {
            SatelliteKind::Communication => "Enables communication between Earth and spacecraft",
            SatelliteKind::Weather => "Monitors Earth's weather patterns and climate",
            SatelliteKind::Navigation => "Provides precise positioning for spacecraft navigation",
            SatelliteKind::Scientific => "Observes distant galaxies and cosmic phenomena",
        }
    }

    pub fn data_type(&self) -> &'static str {
        match self {
            SatelliteKind::Communication => "Communication Signals",
            SatelliteKind::Weather => "Weather Data",
            SatelliteKind::Navigation => "Navigation Data",
            SatelliteKind::Scientific => "Astronomical Data",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            SatelliteKind::Communication => CYAN,
            SatelliteKind::Weather => BLUE,
            SatelliteKind::Navigation => GREEN,
            SatelliteKind::Scientific => PURPLE,
        }
    }
}

/// Data handed over by a satellite link
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataLink {
    pub kind: SatelliteKind,
    pub amount: f32,
}

impl DataLink {
    pub fn describe(&self) -> String {
        format!(
            "Connected to {}!\n\nFunction: {}\n\nData Collected: {:.1} units of {}\n\n\
             This satellite data helps NASA monitor Earth and communicate with spacecraft!",
            self.kind.name(),
            self.kind.function(),
            self.amount,
            self.kind.data_type()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    pub kind: SatelliteKind,
    pub pos: Vec2,
    pub radius: f32,
    pub orbit_radius: f32,
    pub orbit_angle: f32,
    pub orbit_speed: f32,
    pub active: bool,
    pub data_collected: f32,
}

impl Satellite {
    pub fn new(kind: SatelliteKind, orbit_radius: f32, orbit_angle: f32) -> Self {
        Self {
            kind,
            pos: Vec2::ZERO,
            radius: 20.0,
            orbit_radius,
            orbit_angle,
            orbit_speed: SATELLITE_ORBIT_SPEED,
            active: true,
            data_collected: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.orbit_angle += self.orbit_speed * dt;
        self.data_collected += SATELLITE_DATA_RATE * dt;
    }

    pub fn position_around(&self, center: Vec2) -> Vec2 {
        orbit_position(center, self.orbit_radius, self.orbit_angle)
    }

    /// Drain up to `MAX_DATA_PER_LINK`; `None` when nothing is waiting
    pub fn interact(&mut self) -> Option<DataLink> {
        if !self.active || self.data_collected <= 0.0 {
            return None;
        }
        let amount = self.data_collected.min(MAX_DATA_PER_LINK);
        self.data_collected = (self.data_collected - amount).max(0.0);
        Some(DataLink {
            kind: self.kind,
            amount,
        })
    }

    pub fn render(&self, center: Vec2, out: &mut DrawList) {
        out.ring(center, self.orbit_radius, 1.0, [100, 100, 100]);

        let body = if self.active {
            self.kind.color()
        } else {
            [100, 100, 100]
        };
        let p = self.pos;
        out.rect(p - Vec2::new(8.0, 6.0), Vec2::new(16.0, 12.0), body, 0.0);
        out.rect(p - Vec2::new(8.0, 6.0), Vec2::new(16.0, 12.0), WHITE, 2.0);
        out.rect(p - Vec2::new(12.0, 3.0), Vec2::new(6.0, 6.0), BLUE, 0.0);
        out.rect(p + Vec2::new(6.0, -3.0), Vec2::new(6.0, 6.0), BLUE, 0.0);

        match self.kind {
            SatelliteKind::Communication => out.ring(p - Vec2::new(0.0, 10.0), 4.0, 1.0, WHITE),
            SatelliteKind::Scientific => {
                out.line(p - Vec2::new(0.0, 8.0), p - Vec2::new(0.0, 15.0), 2.0, WHITE)
            }
            SatelliteKind::Weather | SatelliteKind::Navigation => {}
        }

        let status = if self.active { GREEN } else { RED };
        out.circle(p + Vec2::new(10.0, -8.0), 3.0, status, 1.0);
    }
}

/// A planet on a circular orbit around the sun
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitingPlanet {
    pub planet: Planet,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub orbit_angle: f32,
}

impl OrbitingPlanet {
    pub fn new(
        planet: Planet,
        orbit_radius: f32,
        orbit_speed: f32,
        orbit_angle: f32,
        sun: Vec2,
    ) -> Self {
        let mut orbiting = Self {
            planet,
            orbit_radius,
            orbit_speed,
            orbit_angle,
        };
        orbiting.planet.pos = orbit_position(sun, orbit_radius, orbit_angle);
        orbiting
    }
}

#[derive(Debug, Clone)]
pub struct SolarSystem {
    pub sun: Vec2,
    pub sun_radius: f32,
    pub planets: Vec<OrbitingPlanet>,
    pub satellites: Vec<Satellite>,
    time_scale: f32,
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SolarSystem {
    pub fn new() -> Self {
        let sun = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        let table: [(&str, Color, f32, f32, f32, f32); 6] = [
            ("Mercury", [169, 169, 169], 8.0, 80.0, 2.0, 0.0),
            ("Venus", [255, 198, 73], 12.0, 110.0, 1.5, 1.2),
            ("Earth", EARTH, 13.0, 150.0, 1.0, 2.4),
            ("Mars", MARS, 10.0, 190.0, 0.8, 4.1),
            ("Jupiter", JUPITER, 25.0, 280.0, 0.4, 0.8),
            ("Saturn", [255, 215, 0], 22.0, 350.0, 0.3, 3.7),
        ];
        let planets = table
            .into_iter()
            .map(|(name, color, radius, orbit_radius, speed, angle)| {
                let planet = Planet::new(name, Vec2::ZERO, color).with_radius(radius);
                OrbitingPlanet::new(planet, orbit_radius, speed, angle, sun)
            })
            .collect();

        let satellites = SatelliteKind::ALL
            .iter()
            .enumerate()
            .map(|(i, &kind)| Satellite::new(kind, 40.0 + 10.0 * i as f32, i as f32 * FRAC_PI_2))
            .collect();

        let mut system = Self {
            sun,
            sun_radius: SUN_RADIUS,
            planets,
            satellites,
            time_scale: 1.0,
        };
        system.anchor_satellites();
        system
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the time scale, clamped to the allowed range
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.clamp(TIME_SCALE_MIN, TIME_SCALE_MAX);
    }

    pub fn change_time_scale(&mut self, delta: f32) {
        self.set_time_scale(self.time_scale + delta);
    }

    pub fn update(&mut self, dt: f32) {
        let dt = dt * self.time_scale;

        for orbiting in &mut self.planets {
            orbiting.orbit_angle += orbiting.orbit_speed * dt * PLANET_RATE_FACTOR;
            orbiting.planet.pos =
                orbit_position(self.sun, orbiting.orbit_radius, orbiting.orbit_angle);
            orbiting.planet.update(dt);
        }

        for satellite in &mut self.satellites {
            satellite.update(dt);
        }
        self.anchor_satellites();
    }

    fn anchor_satellites(&mut self) {
        let Some(earth) = self.earth_position() else {
            return;
        };
        for satellite in &mut self.satellites {
            satellite.pos = satellite.position_around(earth);
        }
    }

    pub fn earth_position(&self) -> Option<Vec2> {
        self.planet("Earth").map(|p| p.pos)
    }

    pub fn planet(&self, name: &str) -> Option<&Planet> {
        self.planets
            .iter()
            .map(|o| &o.planet)
            .find(|p| p.name == name)
    }

    pub fn planet_mut(&mut self, name: &str) -> Option<&mut Planet> {
        self.planets
            .iter_mut()
            .map(|o| &mut o.planet)
            .find(|p| p.name == name)
    }

    /// Index of the closest satellite strictly within `max_distance`
    pub fn nearest_satellite(&self, pos: Vec2, max_distance: f32) -> Option<usize> {
        let earth = self.earth_position()?;
        self.satellites
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.position_around(earth).distance(pos)))
            .filter(|&(_, d)| d < max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    pub fn render(&self, out: &mut DrawList) {
        for orbiting in &self.planets {
            out.ring(self.sun, orbiting.orbit_radius, 1.0, [50, 50, 50]);
        }

        out.circle(self.sun, self.sun_radius, YELLOW, 1.0);
        out.circle(self.sun, self.sun_radius - 5.0, [255, 255, 150], 1.0);

        for orbiting in &self.planets {
            orbiting.planet.render(out);
        }

        if let Some(earth) = self.earth_position() {
            for satellite in &self.satellites {
                satellite.render(earth, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_layout() {
        let system = SolarSystem::new();
        assert_eq!(system.planets.len(), 6);
        assert_eq!(system.satellites.len(), 4);
        let mercury = &system.planets[0];
        assert!((mercury.planet.pos - (system.sun + Vec2::new(80.0, 0.0))).length() < 1e-3);
        assert_eq!(system.satellites[2].orbit_radius, 60.0);
    }

    #[test]
    fn test_angle_advances_with_time_scale() {
        let mut system = SolarSystem::new();
        system.set_time_scale(2.0);
        let before = system.planets[2].orbit_angle;
        system.update(0.5);
        let expected = before + 1.0 * 0.5 * 2.0 * PLANET_RATE_FACTOR;
        assert!((system.planets[2].orbit_angle - expected).abs() < 1e-5);
    }

    #[test]
    fn test_satellites_follow_earth() {
        let mut system = SolarSystem::new();
        for _ in 0..120 {
            system.update(1.0 / 60.0);
        }
        let earth = system.earth_position().expect("earth exists");
        for s in &system.satellites {
            assert!((s.pos.distance(earth) - s.orbit_radius).abs() < 1e-2);
        }
    }

    #[test]
    fn test_satellite_drain_and_empty() {
        let mut sat = Satellite::new(SatelliteKind::Weather, 40.0, 0.0);
        assert!(sat.interact().is_none());

        sat.update(15.0);
        assert_eq!(sat.data_collected, 150.0);
        let link = sat.interact().expect("data waiting");
        assert_eq!(link.amount, 100.0);
        assert_eq!(link.kind, SatelliteKind::Weather);
        assert_eq!(sat.data_collected, 50.0);

        let link = sat.interact().expect("rest drains");
        assert_eq!(link.amount, 50.0);
        assert!(sat.interact().is_none());
    }

    #[test]
    fn test_nearest_satellite_respects_range() {
        let system = SolarSystem::new();
        let target = system.satellites[1].pos;
        assert_eq!(system.nearest_satellite(target + Vec2::new(1.0, 0.0), 60.0), Some(1));
        assert_eq!(system.nearest_satellite(Vec2::new(-5000.0, 0.0), 60.0), None);
    }

    #[test]
    fn test_planet_lookup() {
        let mut system = SolarSystem::new();
        assert!(system.planet("Saturn").is_some());
        assert!(system.planet("Pluto").is_none());
        if let Some(mars) = system.planet_mut("Mars") {
            assert!(mars.mark_visited());
        }
        assert!(system.planet("Mars").is_some_and(|p| p.visited));
    }

    proptest! {
        #[test]
        fn prop_time_scale_always_clamped(
            deltas in proptest::collection::vec(-3.0f32..3.0, 0..40),
        ) {
            let mut system = SolarSystem::new();
            for d in deltas {
                system.change_time_scale(d);
                prop_assert!(system.time_scale() >= TIME_SCALE_MIN);
                prop_assert!(system.time_scale() <= TIME_SCALE_MAX);
            }
        }

        #[test]
        fn prop_orbit_angle_monotonic(
            dts in proptest::collection::vec(0.0f32..0.2, 1..50),
            scale in 0.1f32..5.0,
        ) {
            let mut system = SolarSystem::new();
            system.set_time_scale(scale);
            let mut last: Vec<f32> = system.planets.iter().map(|p| p.orbit_angle).collect();
            for dt in dts {
                system.update(dt);
                for (p, prev) in system.planets.iter().zip(last.iter_mut()) {
                    prop_assert!(p.orbit_angle >= *prev);
                    *prev = p.orbit_angle;
                }
            }
        }
    }
}
