//! Scene state machine
//!
//! Exactly one [`Scene`] is active. Switching scenes always builds the target
//! fresh, so entity and particle state never leaks across visits; only the
//! [`SceneContext`] (profile, audio, settings, rng) survives.

pub mod achievements;
pub mod dialog;
pub mod launch;
pub mod menu;
pub mod mission_select;
pub mod playing;
pub mod solar_system;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::AudioManager;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{KeyEvent, Movement};
use crate::profile::PlayerProfile;
use crate::renderer::DrawList;
use crate::settings::Settings;
use crate::sim::particles::ParticleEngine;

pub use achievements::AchievementsScene;
pub use dialog::{Dialog, DialogOutcome, DialogState};
pub use launch::LaunchScene;
pub use menu::MenuScene;
pub use mission_select::MissionSelectScene;
pub use playing::PlayingScene;
pub use solar_system::SolarSystemScene;

const STAR_COUNT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Menu,
    MissionSelect,
    Launch,
    Playing,
    SolarSystem,
    Achievements,
}

impl SceneId {
    pub const ALL: [SceneId; 6] = [
        SceneId::Menu,
        SceneId::MissionSelect,
        SceneId::Launch,
        SceneId::Playing,
        SceneId::SolarSystem,
        SceneId::Achievements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneId::Menu => "menu",
            SceneId::MissionSelect => "mission_select",
            SceneId::Launch => "launch",
            SceneId::Playing => "playing",
            SceneId::SolarSystem => "solar_system",
            SceneId::Achievements => "achievements",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

/// Requests a scene hands back to the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    Goto(SceneId),
    Quit,
}

/// State shared by every scene for the lifetime of the process
#[derive(Debug)]
pub struct SceneContext {
    pub profile: PlayerProfile,
    pub audio: AudioManager,
    pub settings: Settings,
    rng: Pcg32,
}

impl SceneContext {
    pub fn new(settings: Settings, audio: AudioManager) -> Self {
        Self {
            profile: PlayerProfile::default(),
            audio,
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
        }
    }

    /// Fresh seed for a per-scene random source
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Particle engine capped by the quality settings
    pub fn particle_engine(&mut self) -> ParticleEngine {
        ParticleEngine::new(self.next_seed()).with_cap(self.settings.max_particles())
    }
}

/// Background stars, fixed for the lifetime of a scene
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<(Vec2, u8)>,
}

impl Starfield {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| {
                let pos = Vec2::new(
                    rng.random_range(0.0..SCREEN_WIDTH),
                    rng.random_range(0.0..SCREEN_HEIGHT),
                );
                (pos, rng.random_range(100..=255u8))
            })
            .collect();
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn render(&self, out: &mut DrawList) {
        for &(pos, b) in &self.stars {
            out.circle(pos, 1.0, [b, b, b], 1.0);
        }
    }
}

/// Closed set of playable modes
#[derive(Debug)]
pub enum Scene {
    Menu(MenuScene),
    MissionSelect(MissionSelectScene),
    Launch(LaunchScene),
    Playing(PlayingScene),
    SolarSystem(SolarSystemScene),
    Achievements(AchievementsScene),
}

impl Scene {
    /// Build the scene for `id` and run its on-enter setup
    pub fn enter(id: SceneId, ctx: &mut SceneContext) -> Self {
        match id {
            SceneId::Menu => Scene::Menu(MenuScene::enter(ctx)),
            SceneId::MissionSelect => Scene::MissionSelect(MissionSelectScene::enter(ctx)),
            SceneId::Launch => Scene::Launch(LaunchScene::enter(ctx)),
            SceneId::Playing => Scene::Playing(PlayingScene::enter(ctx)),
            SceneId::SolarSystem => Scene::SolarSystem(SolarSystemScene::enter(ctx)),
            SceneId::Achievements => Scene::Achievements(AchievementsScene::enter(ctx)),
        }
    }

    pub fn id(&self) -> SceneId {
        match self {
            Scene::Menu(_) => SceneId::Menu,
            Scene::MissionSelect(_) => SceneId::MissionSelect,
            Scene::Launch(_) => SceneId::Launch,
            Scene::Playing(_) => SceneId::Playing,
            Scene::SolarSystem(_) => SceneId::SolarSystem,
            Scene::Achievements(_) => SceneId::Achievements,
        }
    }

    pub fn handle_event(
        &mut self,
        event: &KeyEvent,
        ctx: &mut SceneContext,
    ) -> Option<SceneCommand> {
        match self {
            Scene::Menu(s) => s.handle_event(event, ctx),
            Scene::MissionSelect(s) => s.handle_event(event, ctx),
            Scene::Launch(s) => s.handle_event(event, ctx),
            Scene::Playing(s) => s.handle_event(event, ctx),
            Scene::SolarSystem(s) => s.handle_event(event, ctx),
            Scene::Achievements(s) => s.handle_event(event),
        }
    }

    pub fn update(&mut self, dt: f32, movement: &Movement, ctx: &mut SceneContext) {
        match self {
            Scene::Menu(s) => s.update(dt),
            Scene::MissionSelect(_) | Scene::Achievements(_) => {}
            Scene::Launch(s) => s.update(dt, ctx),
            Scene::Playing(s) => s.update(dt, movement, ctx),
            Scene::SolarSystem(s) => s.update(dt, movement),
        }
    }

    pub fn render(&self, ctx: &SceneContext, out: &mut DrawList) {
        match self {
            Scene::Menu(s) => s.render(out),
            Scene::MissionSelect(s) => s.render(out),
            Scene::Launch(s) => s.render(ctx, out),
            Scene::Playing(s) => s.render(ctx, out),
            Scene::SolarSystem(s) => s.render(ctx, out),
            Scene::Achievements(s) => s.render(ctx, out),
        }
    }
}

/// Owns the active scene and the shared context
#[derive(Debug)]
pub struct SceneManager {
    ctx: SceneContext,
    scene: Scene,
    movement: Movement,
    running: bool,
}

impl SceneManager {
    pub fn new(mut ctx: SceneContext) -> Self {
        let scene = Scene::enter(SceneId::Menu, &mut ctx);
        Self {
            ctx,
            scene,
            movement: Movement::default(),
            running: true,
        }
    }

    pub fn current(&self) -> SceneId {
        self.scene.id()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn change_state(&mut self, id: SceneId) {
        log::info!("Scene {} -> {}", self.current().as_str(), id.as_str());
        self.scene = Scene::enter(id, &mut self.ctx);
    }

    /// Switch by name; unknown names leave the current scene untouched
    pub fn change_to_named(&mut self, name: &str) -> bool {
        match SceneId::from_name(name) {
            Some(id) => {
                self.change_state(id);
                true
            }
            None => {
                log::warn!("Ignoring unknown scene {name:?}");
                false
            }
        }
    }

    /// Held keys are tracked before routing so a dialog can't swallow a release
    pub fn handle_event(&mut self, event: KeyEvent) {
        self.movement.apply(&event);
        if let Some(command) = self.scene.handle_event(&event, &mut self.ctx) {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::Goto(id) => self.change_state(id),
            SceneCommand::Quit => {
                log::info!("Quit requested");
                self.running = false;
            }
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.scene.update(dt, &self.movement, &mut self.ctx);
    }

    pub fn render(&self, out: &mut DrawList) {
        out.clear();
        self.scene.render(&self.ctx, out);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.ctx
    }
}
