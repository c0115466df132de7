//! Staged rocket flight for mission launches
//!
//! The rocket flies in screen space (y grows downward, so ascent means
//! negative `vel_y`). Distances are reported in kilometres through a single
//! per-destination scale: the full transfer burn spans `TRANSFER_LENGTH`
//! world units, so `km_per_unit = destination.distance_km / TRANSFER_LENGTH`
//! is applied to both altitude and distance travelled.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::palette::{CYAN, DARK_GREY, GREEN, GREY, MARS, ORANGE, PURPLE, RED, WHITE, YELLOW};
use crate::profile::MissionKind;
use crate::renderer::DrawList;
use crate::sim::particles::{Effect, ParticleEngine};

/// Upward thrust acceleration (world units/s², negative is up)
pub const THRUST_ACCEL: f32 = -200.0;
/// Gravity once the tanks are dry
pub const GRAVITY: f32 = 100.0;
/// Fuel burned per second of powered flight
pub const BURN_RATE: f32 = 15.0;
pub const FULL_FUEL: f32 = 100.0;
/// Fuel thresholds for stage separation
pub const STAGE_2_FUEL: f32 = 66.0;
pub const STAGE_3_FUEL: f32 = 33.0;
pub const MAX_STAGES: u8 = 3;
/// Visual-only separation effect duration (seconds)
pub const SEPARATION_DURATION: f32 = 1.0;
/// Live exhaust particles per rocket
pub const MAX_EXHAUST: usize = 20;
/// Upward world units that make up a complete transfer
pub const TRANSFER_LENGTH: f32 = 4000.0;

const EXHAUST_COLORS: [Color; 3] = [RED, YELLOW, ORANGE];

/// Where a mission's rocket is headed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub distance_km: f64,
    pub color: Color,
}

impl Destination {
    pub fn for_mission(kind: MissionKind) -> Self {
        let (name, distance_km, color) = match kind {
            MissionKind::Exploration => ("Mars", 225_000_000.0, MARS),
            MissionKind::Research => ("Deep Space", 1_000_000_000.0, PURPLE),
            MissionKind::Collaboration => ("ISS", 400.0, CYAN),
            MissionKind::ProblemSolving => ("Asteroid Belt", 550_000_000.0, GREY),
        };
        Self {
            name: name.to_string(),
            distance_km,
            color,
        }
    }

    /// Kilometres represented by one world unit of climb
    pub fn km_per_unit(&self) -> f64 {
        self.distance_km / TRANSFER_LENGTH as f64
    }
}

/// Flight state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    /// On the pad, inert until launched
    PreLaunch,
    /// Burning fuel
    Powered,
    /// Tanks dry, gravity only
    Ballistic,
}

#[derive(Debug, Clone)]
pub struct Rocket {
    pub pos: Vec2,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    pub vel_y: f32,
    pub fuel: f32,
    /// 1..=3, never decreases
    pub stage: u8,
    pub launched: bool,
    pub destination: Destination,
    /// Upward world units flown under power
    distance_units: f64,
    /// Seconds of separation sparks left
    pub separation_timer: f32,
    pub active: bool,
    exhaust: ParticleEngine,
    exhaust_cap: usize,
    exhaust_tick: usize,
}

impl Rocket {
    pub fn new(pos: Vec2, mission: MissionKind, seed: u64) -> Self {
        Self {
            pos,
            start_y: pos.y,
            width: 20.0,
            height: 60.0,
            vel_y: 0.0,
            fuel: FULL_FUEL,
            stage: 1,
            launched: false,
            destination: Destination::for_mission(mission),
            distance_units: 0.0,
            separation_timer: 0.0,
            active: true,
            exhaust: ParticleEngine::new(seed).with_cap(MAX_EXHAUST),
            exhaust_cap: MAX_EXHAUST,
            exhaust_tick: 0,
        }
    }

    /// Lower the exhaust cap to the quality setting (0 disables exhaust)
    pub fn with_exhaust_cap(mut self, max_particles: usize) -> Self {
        self.exhaust_cap = MAX_EXHAUST.min(max_particles);
        self.exhaust = self.exhaust.with_cap(self.exhaust_cap);
        self
    }

    /// Ignite; returns false if already flying or out of fuel
    pub fn launch(&mut self) -> bool {
        if self.launched || self.fuel <= 0.0 {
            return false;
        }
        self.launched = true;
        log::info!("Liftoff toward {}", self.destination.name);
        true
    }

    pub fn phase(&self) -> FlightPhase {
        if !self.launched {
            FlightPhase::PreLaunch
        } else if self.fuel > 0.0 {
            FlightPhase::Powered
        } else {
            FlightPhase::Ballistic
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        match self.phase() {
            FlightPhase::PreLaunch => {}
            FlightPhase::Powered => {
                self.vel_y += THRUST_ACCEL * dt;
                self.pos.y += self.vel_y * dt;

                self.fuel = (self.fuel - BURN_RATE * dt).max(0.0);

                if self.vel_y < 0.0 {
                    self.distance_units += (self.vel_y.abs() * dt) as f64;
                }

                self.check_staging();
                self.emit_exhaust();

                if self.fuel == 0.0 {
                    log::debug!("Main engine cutoff, coasting");
                }
            }
            FlightPhase::Ballistic => {
                self.vel_y += GRAVITY * dt;
                self.pos.y += self.vel_y * dt;
            }
        }

        if self.separation_timer > 0.0 {
            self.separation_timer = (self.separation_timer - dt).max(0.0);
        }
        self.exhaust.update(dt);
    }

    fn check_staging(&mut self) {
        if self.stage == 1 && self.fuel <= STAGE_2_FUEL {
            self.stage = 2;
            self.separation_timer = SEPARATION_DURATION;
            log::debug!("Stage 1 separation");
        }
        if self.stage == 2 && self.fuel <= STAGE_3_FUEL {
            self.stage = 3;
            self.separation_timer = SEPARATION_DURATION;
            log::debug!("Stage 2 separation");
        }
    }

    fn emit_exhaust(&mut self) {
        if self.exhaust.len() >= self.exhaust_cap {
            return;
        }
        let color = EXHAUST_COLORS[self.exhaust_tick % EXHAUST_COLORS.len()];
        self.exhaust_tick += 1;
        let nozzle = self.pos + Vec2::new(0.0, self.height / 2.0);
        self.exhaust.spawn(
            Effect::Thrust {
                facing: -FRAC_PI_2,
                color,
                count: 1,
            },
            nozzle,
        );
    }

    pub fn exhaust_len(&self) -> usize {
        self.exhaust.len()
    }

    pub fn distance_traveled_km(&self) -> f64 {
        self.distance_units * self.destination.km_per_unit()
    }

    pub fn altitude_km(&self) -> f64 {
        ((self.start_y - self.pos.y).max(0.0) as f64) * self.destination.km_per_unit()
    }

    /// Percent of the way to the destination, capped at 100
    pub fn mission_progress(&self) -> f64 {
        if self.destination.distance_km <= 0.0 {
            return 100.0;
        }
        (self.distance_traveled_km() / self.destination.distance_km * 100.0).min(100.0)
    }

    pub fn is_mission_complete(&self) -> bool {
        self.mission_progress() >= 100.0
    }

    /// Body height after jettisoned stages
    pub fn body_height(&self) -> f32 {
        self.height - (self.stage - 1) as f32 * 15.0
    }

    pub fn render(&self, out: &mut DrawList) {
        if !self.active {
            return;
        }
        self.exhaust.render(out);

        let h = self.body_height();
        let half_w = self.width / 2.0;
        let top = self.pos.y - h / 2.0;
        let bottom = self.pos.y + h / 2.0;

        out.rect(
            Vec2::new(self.pos.x - half_w, top),
            Vec2::new(self.width, h),
            WHITE,
            0.0,
        );
        out.rect(
            Vec2::new(self.pos.x - half_w, top),
            Vec2::new(self.width, h),
            [200, 200, 200],
            2.0,
        );

        // Nose cone
        out.polygon(
            &[
                Vec2::new(self.pos.x, top - 10.0),
                Vec2::new(self.pos.x - half_w, top),
                Vec2::new(self.pos.x + half_w, top),
            ],
            RED,
        );

        // Fins
        let fin = [
            Vec2::new(self.pos.x - half_w, bottom),
            Vec2::new(self.pos.x - half_w - 8.0, bottom + 10.0),
            Vec2::new(self.pos.x - half_w, bottom + 5.0),
        ];
        out.polygon(&fin, [100, 100, 100]);
        let mirrored: Vec<Vec2> = fin
            .iter()
            .map(|p| Vec2::new(2.0 * self.pos.x - p.x, p.y))
            .collect();
        out.polygon(&mirrored, [100, 100, 100]);

        if self.separation_timer > 0.0 {
            // Deterministic spark ring, brightness fades with the timer
            for i in 0..10 {
                let angle = i as f32 / 10.0 * std::f32::consts::TAU;
                let spark = self.pos + Vec2::new(angle.cos() * 15.0, angle.sin() * 10.0);
                out.circle(spark, 2.0, YELLOW, self.separation_timer / SEPARATION_DURATION);
            }
        }

        // Fuel gauge
        let bar = Vec2::new(self.pos.x - 30.0, top - 30.0);
        out.rect(bar, Vec2::new(60.0, 8.0), DARK_GREY, 0.0);
        let fuel_color = if self.fuel > 30.0 { GREEN } else { RED };
        out.rect(bar, Vec2::new(self.fuel / FULL_FUEL * 60.0, 8.0), fuel_color, 0.0);
        out.text(
            bar + Vec2::new(30.0, -14.0),
            format!("Stage {}/{}", self.stage, MAX_STAGES),
            20.0,
            WHITE,
        );
    }
}
