//! Orrery explorer with a follow camera

use std::collections::HashMap;

use glam::Vec2;

use super::dialog::{Dialog, DialogOutcome, DialogState};
use super::{SceneCommand, SceneContext, SceneId, Starfield};
use crate::consts::{
    PLANET_INFO_MARGIN, SATELLITE_LINK_RANGE, SCREEN_HEIGHT, SCREEN_WIDTH, TIME_SCALE_STEP,
    ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use crate::input::{Key, KeyEvent, Movement};
use crate::palette::{CYAN, WHITE, YELLOW};
use crate::profile::Counter;
use crate::renderer::DrawList;
use crate::sim::orbit::{SatelliteKind, SolarSystem};
use crate::sim::planet::PlanetDetails;
use crate::sim::player::Player;

const FIRST_VISIT_POINTS: u32 = 100;
const DATA_LINK_POINTS: u32 = 50;
/// Camera easing rate (per second)
const CAMERA_RATE: f32 = 2.0;

#[derive(Debug)]
pub struct SolarSystemScene {
    player: Player,
    system: SolarSystem,
    dialog: DialogState,
    camera: Vec2,
    zoom: f32,
    data_collected: HashMap<SatelliteKind, f32>,
    stars: Starfield,
}

impl SolarSystemScene {
    pub fn enter(ctx: &mut SceneContext) -> Self {
        let mut system = SolarSystem::new();
        system.set_time_scale(ctx.settings.time_scale);
        Self {
            player: Player::new(Vec2::new(SCREEN_WIDTH / 2.0 - 100.0, SCREEN_HEIGHT / 2.0)),
            system,
            dialog: DialogState::new(),
            camera: Vec2::ZERO,
            zoom: 1.0,
            data_collected: HashMap::new(),
            stars: Starfield::new(ctx.next_seed()),
        }
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    pub fn data_collected(&self, kind: SatelliteKind) -> f32 {
        self.data_collected.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn handle_event(
        &mut self,
        event: &KeyEvent,
        ctx: &mut SceneContext,
    ) -> Option<SceneCommand> {
        if self.dialog.handle_input(event) != DialogOutcome::NotActive || !event.pressed {
            return None;
        }
        match event.key {
            Key::Cancel => return Some(SceneCommand::Goto(SceneId::Menu)),
            Key::Action => self.interact(ctx),
            Key::TimeScaleUp => self.system.change_time_scale(TIME_SCALE_STEP),
            Key::TimeScaleDown => self.system.change_time_scale(-TIME_SCALE_STEP),
            Key::ZoomIn => self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX),
            Key::ZoomOut => self.zoom = (self.zoom - ZOOM_STEP).max(ZOOM_MIN),
            _ => {}
        }
        None
    }

    /// Planet info takes priority over satellite links
    fn interact(&mut self, ctx: &mut SceneContext) {
        let player = &self.player;
        let planet = self.system.planets.iter_mut().map(|o| &mut o.planet).find(|p| {
            player.pos.distance(p.pos) < p.radius + player.radius + PLANET_INFO_MARGIN
        });
        if let Some(planet) = planet {
            if planet.mark_visited() {
                ctx.profile.add_knowledge(FIRST_VISIT_POINTS);
                ctx.profile.increment(Counter::PlanetsVisited);
                log::info!("First visit to {}", planet.name);
            }
            self.dialog.show(Dialog::info(
                format!("Exploring {}", planet.name),
                PlanetDetails::describe(&planet.name),
            ));
            return;
        }

        let Some(i) = self.system.nearest_satellite(self.player.pos, SATELLITE_LINK_RANGE) else {
            return;
        };
        if let Some(link) = self.system.satellites[i].interact() {
            *self.data_collected.entry(link.kind).or_insert(0.0) += link.amount;
            ctx.profile.add_knowledge(DATA_LINK_POINTS);
            log::debug!("Data link with {}: {:.1} units", link.kind.name(), link.amount);
            self.dialog.show(Dialog::info("Satellite Data Link", link.describe()));
        }
    }

    pub fn update(&mut self, dt: f32, movement: &Movement) {
        self.player.update(movement, dt);
        self.system.update(dt);

        let target = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0) - self.player.pos;
        self.camera += (target - self.camera) * (dt * CAMERA_RATE).min(1.0);
    }

    pub fn render(&self, ctx: &SceneContext, out: &mut DrawList) {
        self.stars.render(out);

        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        out.set_camera(self.camera, self.zoom, center);
        self.system.render(out);
        self.player.render(out);
        out.reset_camera();

        out.text(
            Vec2::new(10.0, 10.0),
            format!("Knowledge Points: {}", ctx.profile.knowledge_points),
            32.0,
            YELLOW,
        );
        let mut y = 50.0;
        for kind in SatelliteKind::ALL {
            if let Some(amount) = self.data_collected.get(&kind) {
                out.text(
                    Vec2::new(10.0, y),
                    format!("{}: {amount:.0}", kind.data_type()),
                    24.0,
                    CYAN,
                );
                y += 25.0;
            }
        }

        let controls = [
            "ARROWS - Move spacecraft",
            "SPACE - Interact with objects",
            "+/- - Change time scale",
            "Z/X - Zoom in/out",
            "ESC - Return to menu",
        ];
        for (i, line) in controls.iter().enumerate() {
            out.text(
                Vec2::new(SCREEN_WIDTH - 250.0, 10.0 + i as f32 * 20.0),
                *line,
                24.0,
                WHITE,
            );
        }
        out.text(
            Vec2::new(SCREEN_WIDTH - 220.0, SCREEN_HEIGHT - 30.0),
            format!("Time: {:.1}x  Zoom: {:.1}x", self.system.time_scale(), self.zoom),
            24.0,
            WHITE,
        );

        self.dialog.render(out);
    }
}
