//! Planets the player can visit

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::palette::{GREEN, WHITE};
use crate::renderer::DrawList;

/// Default radius for free-floating planets in the mission field
pub const PLANET_RADIUS: f32 = 40.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Set once on first arrival, never cleared
    pub visited: bool,
    /// Drives the unvisited pulse
    pub animation_time: f32,
    pub active: bool,
}

impl Planet {
    pub fn new(name: impl Into<String>, pos: Vec2, color: Color) -> Self {
        Self {
            name: name.into(),
            pos,
            radius: PLANET_RADIUS,
            color,
            visited: false,
            animation_time: 0.0,
            active: true,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.animation_time += dt;
    }

    /// Flag the planet as visited; true only the first time
    pub fn mark_visited(&mut self) -> bool {
        if self.visited {
            return false;
        }
        self.visited = true;
        true
    }

    /// Short description shown on arrival
    pub fn blurb(&self) -> &'static str {
        match self.name.as_str() {
            "Earth" => "Our home planet, 71% covered by water",
            "Mars" => "The Red Planet, potential for human colonization",
            "Moon" => "Earth's natural satellite, first human landing 1969",
            "Jupiter" => "Largest planet, has over 80 moons",
            _ => "An interesting celestial body to explore!",
        }
    }

    /// Radius as drawn this frame
    pub fn display_radius(&self) -> f32 {
        if self.visited {
            self.radius
        } else {
            self.radius * (1.0 + 0.1 * (self.animation_time * 3.0).sin())
        }
    }

    pub fn render(&self, out: &mut DrawList) {
        if !self.active {
            return;
        }
        let r = self.display_radius();
        out.circle(self.pos, r, self.color, 1.0);

        let glow = self.color.map(|c| c.saturating_add(50));
        out.ring(self.pos, r + 5.0, 2.0, glow);

        out.text(
            self.pos - Vec2::new(0.0, self.radius + 20.0),
            self.name.clone(),
            24.0,
            WHITE,
        );

        if self.visited {
            let badge = self.pos + Vec2::new(self.radius - 10.0, -self.radius + 10.0);
            out.circle(badge, 5.0, GREEN, 1.0);
        }
    }
}

/// Reference card for a solar-system planet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanetDetails {
    pub distance_from_sun: &'static str,
    pub day_length: &'static str,
    pub temperature: &'static str,
    pub fact: &'static str,
}

impl PlanetDetails {
    pub fn lookup(name: &str) -> Option<Self> {
        let (distance_from_sun, day_length, temperature, fact) = match name {
            "Mercury" => (
                "58 million km",
                "59 Earth days",
                "-173°C to 427°C",
                "Mercury has no atmosphere and extreme temperature variations.",
            ),
            "Venus" => (
                "108 million km",
                "243 Earth days",
                "462°C (hottest planet)",
                "Venus rotates backwards and has a thick, toxic atmosphere.",
            ),
            "Earth" => (
                "150 million km",
                "24 hours",
                "-89°C to 58°C",
                "The only known planet with life, protected by a magnetic field.",
            ),
            "Mars" => (
                "228 million km",
                "24.6 hours",
                "-87°C to -5°C",
                "Mars has the largest volcano and canyon in the solar system.",
            ),
            "Jupiter" => (
                "778 million km",
                "9.9 hours",
                "-108°C",
                "Jupiter is a gas giant with over 80 moons and protects inner planets.",
            ),
            "Saturn" => (
                "1.4 billion km",
                "10.7 hours",
                "-139°C",
                "Saturn has spectacular rings made of ice and rock particles.",
            ),
            _ => return None,
        };
        Some(Self {
            distance_from_sun,
            day_length,
            temperature,
            fact,
        })
    }

    /// Multi-line dialog body for `name`; unknown planets get a generic card
    pub fn describe(name: &str) -> String {
        match Self::lookup(name) {
            Some(d) => format!(
                "Welcome to {name}!\n\nDistance from Sun: {}\nDay Length: {}\nTemperature: {}\n\n{}",
                d.distance_from_sun, d.day_length, d.temperature, d.fact
            ),
            None => format!(
                "Welcome to {name}!\n\nDistance from Sun: Unknown\nDay Length: Unknown\nTemperature: Unknown\n\nA fascinating world to explore!"
            ),
        }
    }
}
