//! Free-flight exploration around planets, asteroids and a station

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::dialog::{Dialog, DialogOutcome, DialogState};
use super::{SceneCommand, SceneContext, SceneId, Starfield};
use crate::audio::SoundEffect;
use crate::consts::{SCAN_RADIUS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::facts::{FactTopic, random_fact};
use crate::input::{Key, KeyEvent, Movement};
use crate::palette::{CYAN, EARTH, GREEN, JUPITER, MARS, MOON, WHITE, YELLOW};
use crate::profile::Counter;
use crate::renderer::DrawList;
use crate::sim::asteroid::Asteroid;
use crate::sim::interaction::{self, Interaction};
use crate::sim::objective::{MAX_PROGRESS, MissionObjective};
use crate::sim::particles::{Effect, ParticleEngine};
use crate::sim::planet::Planet;
use crate::sim::player::Player;
use crate::sim::station::SpaceStation;

const ASTEROID_ATTEMPTS: usize = 8;
const SPAWN_MARGIN: f32 = 100.0;
/// Minimum distance between a spawned asteroid and any planet centre
const PLANET_CLEARANCE: f32 = 100.0;

const ARRIVAL_POINTS: u32 = 50;
const SCAN_POINTS: u32 = 25;
const ANSWER_POINTS: u32 = 50;
const DOCK_POINTS: u32 = 100;

#[derive(Debug)]
pub struct PlayingScene {
    player: Player,
    planets: Vec<Planet>,
    asteroids: Vec<Asteroid>,
    stations: Vec<SpaceStation>,
    objective: Option<MissionObjective>,
    mission_title: String,
    resources_scanned: u32,
    /// Action held; draws the scan radius
    scanning: bool,
    dialog: DialogState,
    particles: ParticleEngine,
    stars: Starfield,
    rng: Pcg32,
}

impl PlayingScene {
    pub fn enter(ctx: &mut SceneContext) -> Self {
        let mut rng = Pcg32::seed_from_u64(ctx.next_seed());
        let planets = vec![
            Planet::new("Earth", Vec2::new(200.0, 200.0), EARTH),
            Planet::new("Mars", Vec2::new(600.0, 300.0), MARS),
            Planet::new("Moon", Vec2::new(800.0, 150.0), MOON),
            Planet::new("Jupiter", Vec2::new(400.0, 500.0), JUPITER),
        ];
        let asteroids = spawn_asteroids(&planets, &mut rng);
        log::debug!("Spawned {} asteroids", asteroids.len());

        let mut scene = Self {
            player: Player::new(Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)),
            planets,
            asteroids,
            stations: vec![SpaceStation::new(
                "International Space Station",
                Vec2::new(300.0, 600.0),
            )],
            objective: None,
            mission_title: String::new(),
            resources_scanned: 0,
            scanning: false,
            dialog: DialogState::new(),
            particles: ctx.particle_engine(),
            stars: Starfield::new(ctx.next_seed()),
            rng,
        };

        if let Some(mission) = &ctx.profile.current_mission {
            scene.mission_title = format!("Mission: {}", mission.name);
            scene.objective = Some(MissionObjective::new(mission.kind));
            scene.dialog.show(Dialog::info(
                mission.name.clone(),
                format!(
                    "{} Your objective is to explore, learn, and complete educational \
                     challenges to advance humanity's understanding of space.",
                    mission.description
                ),
            ));
        }
        scene
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    /// HUD progress; 100 once the objective is complete
    pub fn mission_progress(&self) -> u32 {
        match &self.objective {
            Some(o) if o.is_complete() => MAX_PROGRESS,
            Some(o) => o.progress(),
            None => 0,
        }
    }

    pub fn handle_event(
        &mut self,
        event: &KeyEvent,
        ctx: &mut SceneContext,
    ) -> Option<SceneCommand> {
        if event.key == Key::Action {
            self.scanning = event.pressed;
        }

        match self.dialog.handle_input(event) {
            DialogOutcome::NotActive => {}
            DialogOutcome::Answered(choice) => {
                self.answer(choice, ctx);
                return None;
            }
            DialogOutcome::Consumed | DialogOutcome::Dismissed => return None,
        }
        if !event.pressed {
            return None;
        }

        match event.key {
            Key::Cancel => Some(SceneCommand::Goto(SceneId::Menu)),
            Key::Action => {
                self.scan(ctx);
                None
            }
            _ => None,
        }
    }

    /// Scan the first unscanned asteroid in range, else surface the current question
    fn scan(&mut self, ctx: &mut SceneContext) {
        let target = interaction::scan_target(self.player.pos, SCAN_RADIUS, &self.asteroids);
        if let Some(i) = target {
            let asteroid = &mut self.asteroids[i];
            if let Some(report) = asteroid.scan() {
                self.resources_scanned += 1;
                ctx.profile.add_knowledge(SCAN_POINTS);
                ctx.profile.increment(Counter::AsteroidsScanned);
                ctx.audio.play(SoundEffect::Scan);
                self.particles.spawn(Effect::scan_ring(), asteroid.pos);
                log::debug!("Scanned {} asteroid", report.mineral.as_str());

                self.dialog.show(Dialog::info(
                    "Asteroid Scan Complete",
                    format!(
                        "Discovered {} asteroid! Size: {}, Value: {} credits. This data helps \
                         NASA understand asteroid composition for future mining missions.",
                        report.mineral.as_str(),
                        report.size.as_str(),
                        report.value
                    ),
                ));
                return;
            }
        }

        if let Some(question) = self.objective.as_ref().and_then(|o| o.current_question()) {
            self.dialog.show(Dialog::Question(question.clone()));
        }
    }

    fn answer(&mut self, choice: usize, ctx: &mut SceneContext) {
        let Some(result) = self.objective.as_mut().and_then(|o| o.answer(choice)) else {
            return;
        };
        let text = if result.correct {
            ctx.profile.add_knowledge(ANSWER_POINTS);
            ctx.audio.play(SoundEffect::Success);
            self.particles.spawn(Effect::SuccessBurst, self.player.pos);
            format!("Correct! {}", result.explanation)
        } else {
            ctx.audio.play(SoundEffect::Beep);
            format!("Incorrect. {}", result.explanation)
        };
        self.dialog.show(Dialog::info("Answer Result", text));
    }

    pub fn update(&mut self, dt: f32, movement: &Movement, ctx: &mut SceneContext) {
        self.player.update(movement, dt);
        for planet in &mut self.planets {
            planet.update(dt);
        }
        for asteroid in &mut self.asteroids {
            asteroid.update(dt);
        }
        for station in &mut self.stations {
            station.update(dt);
        }

        if !self.dialog.is_active() {
            let events = interaction::detect(
                &self.player,
                &self.planets,
                &self.stations,
                &self.asteroids,
                false,
            );
            for event in events {
                match event {
                    Interaction::Arrival { planet } => self.arrive(planet, ctx),
                    Interaction::Dock { station } => self.dock(station, ctx),
                    Interaction::Scan { .. } => {}
                }
                // Remaining contacts fire once this dialog closes
                if self.dialog.is_active() {
                    break;
                }
            }
        }

        self.particles.update(dt);
    }

    fn arrive(&mut self, index: usize, ctx: &mut SceneContext) {
        let Some(planet) = self.planets.get_mut(index) else {
            return;
        };
        if !planet.mark_visited() {
            return;
        }
        ctx.profile.add_knowledge(ARRIVAL_POINTS);
        ctx.profile.increment(Counter::PlanetsVisited);
        ctx.audio.play(SoundEffect::Success);
        self.particles.spawn(Effect::explosion(planet.color), planet.pos);
        log::info!("Arrived at {}", planet.name);

        let fact = random_fact(Some(FactTopic::Planet(&planet.name)), &mut self.rng);
        self.dialog.show(Dialog::info(
            format!("Exploring {}", planet.name),
            format!(
                "Welcome to {}! {}. Here's what NASA has discovered: {fact}",
                planet.name,
                planet.blurb()
            ),
        ));
    }

    fn dock(&mut self, index: usize, ctx: &mut SceneContext) {
        let Some(station) = self.stations.get_mut(index) else {
            return;
        };
        let Some(report) = station.dock() else {
            return;
        };
        ctx.profile.add_knowledge(DOCK_POINTS);
        ctx.profile.increment(Counter::StationsDocked);
        ctx.audio.play(SoundEffect::Dock);
        self.particles.spawn(Effect::warp(), station.pos);
        log::info!("Docked with {}", report.station);

        self.dialog.show(Dialog::info(
            "Space Station Docked",
            format!(
                "{}\nThis collaboration represents humanity working together in space!",
                report.describe()
            ),
        ));
    }

    pub fn render(&self, ctx: &SceneContext, out: &mut DrawList) {
        self.stars.render(out);
        for planet in &self.planets {
            planet.render(out);
        }
        for asteroid in &self.asteroids {
            asteroid.render(out);
        }
        for station in &self.stations {
            station.render(out);
        }
        self.player.render(out);
        if self.scanning {
            out.ring(self.player.pos, SCAN_RADIUS, 2.0, GREEN);
        }
        self.particles.render(out);

        self.render_hud(ctx, out);
        self.dialog.render(out);
    }

    fn render_hud(&self, ctx: &SceneContext, out: &mut DrawList) {
        out.text(Vec2::new(10.0, 10.0), self.mission_title.clone(), 32.0, WHITE);

        let progress = self.mission_progress();
        out.rect(Vec2::new(10.0, 50.0), Vec2::new(300.0, 20.0), WHITE, 2.0);
        out.rect(
            Vec2::new(11.0, 51.0),
            Vec2::new(progress as f32 / MAX_PROGRESS as f32 * 298.0, 18.0),
            GREEN,
            0.0,
        );
        out.text(
            Vec2::new(320.0, 52.0),
            format!("Mission Progress: {progress}%"),
            20.0,
            WHITE,
        );
        out.text(
            Vec2::new(10.0, 80.0),
            format!("Knowledge Points: {}", ctx.profile.knowledge_points),
            24.0,
            YELLOW,
        );
        out.text(
            Vec2::new(10.0, 110.0),
            format!("Resources Scanned: {}", self.resources_scanned),
            24.0,
            CYAN,
        );

        let help = [
            "ARROWS - Move spacecraft",
            "SPACE - Scan objects/Answer questions",
            "Approach planets & stations",
            "ESC - Return to menu",
        ];
        for (i, line) in help.iter().enumerate() {
            out.text(
                Vec2::new(SCREEN_WIDTH - 250.0, 10.0 + i as f32 * 25.0),
                *line,
                24.0,
                WHITE,
            );
        }
    }
}

/// Random field that keeps clear of the planets; rejected attempts are not retried
fn spawn_asteroids<R: Rng>(planets: &[Planet], rng: &mut R) -> Vec<Asteroid> {
    let mut asteroids = Vec::new();
    for _ in 0..ASTEROID_ATTEMPTS {
        let pos = Vec2::new(
            rng.random_range(SPAWN_MARGIN..=SCREEN_WIDTH - SPAWN_MARGIN),
            rng.random_range(SPAWN_MARGIN..=SCREEN_HEIGHT - SPAWN_MARGIN),
        );
        if planets.iter().any(|p| p.pos.distance(pos) < PLANET_CLEARANCE) {
            continue;
        }
        asteroids.push(Asteroid::random(pos, rng));
    }
    asteroids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Mission, MissionKind};
    use crate::scene::tests::context;
    use crate::sim::asteroid::Mineral;

    const DT: f32 = 1.0 / 60.0;

    fn press(scene: &mut PlayingScene, ctx: &mut SceneContext, key: Key) {
        scene.handle_event(&KeyEvent::press(key), ctx);
        scene.handle_event(&KeyEvent::release(key), ctx);
    }

    fn collaboration_scene() -> (SceneContext, PlayingScene) {
        let mut ctx = context();
        let mission = Mission::catalogue()
            .into_iter()
            .find(|m| m.kind == MissionKind::Collaboration)
            .expect("catalogue has a collaboration mission");
        ctx.profile.begin_mission(mission);
        let mut scene = PlayingScene::enter(&mut ctx);
        scene.asteroids.clear();
        (ctx, scene)
    }

    #[test]
    fn test_asteroids_keep_clear_of_planets() {
        let mut ctx = context();
        let scene = PlayingScene::enter(&mut ctx);
        assert!(scene.asteroids().len() <= ASTEROID_ATTEMPTS);
        for asteroid in scene.asteroids() {
            assert!(scene.planets.iter().all(|p| p.pos.distance(asteroid.pos) >= PLANET_CLEARANCE));
        }
        assert!(!scene.dialog().is_active());
    }

    #[test]
    fn test_arrival_awards_once() {
        let mut ctx = context();
        let mut scene = PlayingScene::enter(&mut ctx);
        scene.player.pos = scene.planets[0].pos;
        let still = Movement::default();

        scene.update(DT, &still, &mut ctx);
        assert!(scene.dialog().is_active());
        assert_eq!(ctx.profile.knowledge_points, ARRIVAL_POINTS);
        assert_eq!(ctx.profile.planets_visited, 1);
        assert_eq!(ctx.audio.last_played(), Some(SoundEffect::Success));

        press(&mut scene, &mut ctx, Key::Confirm);
        scene.update(DT, &still, &mut ctx);
        assert!(!scene.dialog().is_active());
        assert_eq!(ctx.profile.planets_visited, 1);
    }

    #[test]
    fn test_open_dialog_defers_arrival() {
        let (mut ctx, mut scene) = collaboration_scene();
        assert!(scene.dialog().is_active());
        scene.player.pos = scene.planets[1].pos;

        let still = Movement::default();
        scene.update(DT, &still, &mut ctx);
        assert_eq!(ctx.profile.planets_visited, 0);

        press(&mut scene, &mut ctx, Key::Confirm);
        scene.update(DT, &still, &mut ctx);
        assert_eq!(ctx.profile.planets_visited, 1);
    }

    #[test]
    fn test_dock_with_station() {
        let mut ctx = context();
        let mut scene = PlayingScene::enter(&mut ctx);
        scene.player.pos = scene.stations[0].pos + Vec2::new(80.0, 0.0);

        scene.update(DT, &Movement::default(), &mut ctx);
        assert_eq!(ctx.profile.stations_docked, 1);
        assert_eq!(ctx.profile.knowledge_points, DOCK_POINTS);
        assert_eq!(ctx.audio.last_played(), Some(SoundEffect::Dock));
        match scene.dialog().current() {
            Some(Dialog::Info { text, .. }) => assert!(text.contains("Crew Members")),
            other => panic!("unexpected dialog {other:?}"),
        }
    }

    #[test]
    fn test_scan_then_question() {
        let (mut ctx, mut scene) = collaboration_scene();
        press(&mut scene, &mut ctx, Key::Confirm);
        let near = scene.player.pos + Vec2::new(30.0, 0.0);
        scene
            .asteroids
            .push(Asteroid::new(near, 30.0, 0.0, 0.0, Mineral::Platinum));

        press(&mut scene, &mut ctx, Key::Action);
        assert_eq!(ctx.profile.asteroids_scanned, 1);
        assert_eq!(ctx.profile.knowledge_points, SCAN_POINTS);
        assert_eq!(ctx.audio.last_played(), Some(SoundEffect::Scan));
        match scene.dialog().current() {
            Some(Dialog::Info { text, .. }) => assert!(text.contains("Platinum")),
            other => panic!("unexpected dialog {other:?}"),
        }

        // Dismiss, then the same asteroid yields the quiz instead
        press(&mut scene, &mut ctx, Key::Action);
        press(&mut scene, &mut ctx, Key::Action);
        assert!(matches!(scene.dialog().current(), Some(Dialog::Question(_))));
        assert_eq!(ctx.profile.asteroids_scanned, 1);
    }

    #[test]
    fn test_answers_drive_progress() {
        let (mut ctx, mut scene) = collaboration_scene();
        press(&mut scene, &mut ctx, Key::Confirm);
        let correct = scene
            .objective
            .as_ref()
            .and_then(|o| o.current_question())
            .map(|q| q.correct)
            .expect("question available");
        let wrong = (correct + 1) % 4;

        press(&mut scene, &mut ctx, Key::Action);
        press(&mut scene, &mut ctx, Key::Digit(wrong as u8 + 1));
        assert_eq!(ctx.audio.last_played(), Some(SoundEffect::Beep));
        assert_eq!(scene.mission_progress(), 0);
        assert_eq!(ctx.profile.knowledge_points, 0);

        press(&mut scene, &mut ctx, Key::Confirm);
        press(&mut scene, &mut ctx, Key::Action);
        press(&mut scene, &mut ctx, Key::Digit(correct as u8 + 1));
        assert_eq!(ctx.profile.knowledge_points, ANSWER_POINTS);
        match scene.dialog().current() {
            Some(Dialog::Info { text, .. }) => assert!(text.starts_with("Correct!")),
            other => panic!("unexpected dialog {other:?}"),
        }

        // Single-question bank: the objective is now complete
        assert_eq!(scene.mission_progress(), MAX_PROGRESS);
        let mut out = DrawList::new();
        scene.render(&ctx, &mut out);
        assert!(out.texts().any(|t| t == "Mission Progress: 100%"));
    }

    #[test]
    fn test_cancel_returns_to_menu() {
        let mut ctx = context();
        let mut scene = PlayingScene::enter(&mut ctx);
        assert_eq!(
            scene.handle_event(&KeyEvent::press(Key::Cancel), &mut ctx),
            Some(SceneCommand::Goto(SceneId::Menu))
        );
    }
}
