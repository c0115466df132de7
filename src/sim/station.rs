//! Orbital space station

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::palette::{BLUE, CYAN, GREEN, WHITE};
use crate::renderer::DrawList;

/// Panel spin (radians/sec)
const ROTATION_RATE: f32 = 0.5;

const CREW: [&str; 4] = [
    "Commander Sarah Chen (USA)",
    "Flight Engineer Yuki Tanaka (Japan)",
    "Mission Specialist Alex Petrov (Russia)",
    "Research Scientist Maria Santos (ESA)",
];

const EXPERIMENTS: [&str; 4] = [
    "Protein Crystal Growth",
    "Plant Growth in Microgravity",
    "Materials Science Research",
    "Earth Observation Study",
];

/// What the crew shares on a successful dock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockReport {
    pub station: String,
    pub crew: Vec<String>,
    pub experiments: Vec<String>,
}

impl DockReport {
    pub fn describe(&self) -> String {
        let mut text = format!("Successfully docked with {}!\n\nCrew Members:\n", self.station);
        for member in &self.crew {
            text.push_str(&format!("- {member}\n"));
        }
        text.push_str("\nCurrent Experiments:\n");
        for experiment in &self.experiments {
            text.push_str(&format!("- {experiment}\n"));
        }
        text
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceStation {
    pub name: String,
    pub pos: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub docked: bool,
    pub crew: Vec<String>,
    pub experiments: Vec<String>,
    pub active: bool,
}

impl SpaceStation {
    pub fn new(name: impl Into<String>, pos: Vec2) -> Self {
        Self {
            name: name.into(),
            pos,
            radius: 50.0,
            rotation: 0.0,
            docked: false,
            crew: CREW.iter().map(|s| s.to_string()).collect(),
            experiments: EXPERIMENTS.iter().map(|s| s.to_string()).collect(),
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.rotation += ROTATION_RATE * dt;
    }

    /// Dock once; `None` if already docked
    pub fn dock(&mut self) -> Option<DockReport> {
        if self.docked {
            return None;
        }
        self.docked = true;
        Some(DockReport {
            station: self.name.clone(),
            crew: self.crew.clone(),
            experiments: self.experiments.clone(),
        })
    }

    pub fn undock(&mut self) {
        self.docked = false;
    }

    pub fn render(&self, out: &mut DrawList) {
        if !self.active {
            return;
        }
        out.circle(self.pos, 25.0, [150, 150, 150], 1.0);
        out.ring(self.pos, 25.0, 2.0, WHITE);

        for i in 0..4 {
            let dir = Vec2::from_angle(self.rotation + i as f32 * FRAC_PI_2);
            let start = self.pos + dir * 30.0;
            let end = self.pos + dir * 70.0;
            out.line(start, end, 8.0, BLUE);
            out.line(start, end, 4.0, CYAN);
        }

        out.text(self.pos - Vec2::new(0.0, 70.0), self.name.clone(), 24.0, WHITE);

        if self.docked {
            out.circle(self.pos - Vec2::new(0.0, 35.0), 5.0, GREEN, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dock_once() {
        let mut iss = SpaceStation::new("International Space Station", Vec2::new(300.0, 600.0));
        let report = iss.dock().expect("first dock succeeds");
        assert_eq!(report.crew.len(), 4);
        assert_eq!(report.experiments.len(), 4);
        assert!(report.describe().contains("Yuki Tanaka"));
        assert!(iss.dock().is_none());

        iss.undock();
        assert!(iss.dock().is_some());
    }

    #[test]
    fn test_inactive_station_does_not_spin() {
        let mut iss = SpaceStation::new("ISS", Vec2::ZERO);
        iss.active = false;
        iss.update(2.0);
        assert_eq!(iss.rotation, 0.0);
    }

    #[test]
    fn test_rotation() {
        let mut iss = SpaceStation::new("ISS", Vec2::ZERO);
        iss.update(2.0);
        assert!((iss.rotation - 1.0).abs() < 1e-6);
    }
}
