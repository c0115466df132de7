//! Launch pad: briefing, countdown and staged ascent

use glam::Vec2;

use super::dialog::{Dialog, DialogOutcome, DialogState};
use super::{SceneCommand, SceneContext, SceneId, Starfield};
use crate::audio::SoundEffect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{Key, KeyEvent};
use crate::palette::{CYAN, GREEN, GREY, RED, SPACE_BLUE, WHITE, YELLOW};
use crate::profile::{Counter, Mission};
use crate::renderer::DrawList;
use crate::sim::particles::{Effect, ParticleEngine};
use crate::sim::rocket::Rocket;

pub const COUNTDOWN_SECS: f32 = 10.0;
const SKY_BANDS: usize = 16;

#[derive(Debug)]
pub struct LaunchScene {
    mission: Option<Mission>,
    rocket: Option<Rocket>,
    dialog: DialogState,
    pad: Vec2,
    countdown: f32,
    countdown_active: bool,
    briefing_shown: bool,
    completed: bool,
    particles: ParticleEngine,
    stars: Starfield,
}

impl LaunchScene {
    pub fn enter(ctx: &mut SceneContext) -> Self {
        let pad = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 100.0);
        let mut scene = Self {
            mission: ctx.profile.current_mission.clone(),
            rocket: None,
            dialog: DialogState::new(),
            pad,
            countdown: COUNTDOWN_SECS,
            countdown_active: false,
            briefing_shown: false,
            completed: false,
            particles: ctx.particle_engine(),
            stars: Starfield::new(ctx.next_seed()),
        };

        match &scene.mission {
            Some(mission) => {
                let rocket = Rocket::new(pad, mission.kind, ctx.next_seed())
                    .with_exhaust_cap(ctx.settings.max_particles());
                scene.dialog.show(Dialog::info("Mission Briefing", briefing(mission, &rocket)));
                scene.rocket = Some(rocket);
                scene.briefing_shown = true;
            }
            None => log::warn!("Launch entered without a mission"),
        }
        scene
    }

    pub fn rocket(&self) -> Option<&Rocket> {
        self.rocket.as_ref()
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn countdown(&self) -> Option<f32> {
        self.countdown_active.then_some(self.countdown)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn handle_event(
        &mut self,
        event: &KeyEvent,
        ctx: &mut SceneContext,
    ) -> Option<SceneCommand> {
        if self.dialog.handle_input(event) != DialogOutcome::NotActive {
            return None;
        }
        if !event.pressed {
            return None;
        }

        match event.key {
            Key::Cancel => Some(SceneCommand::Goto(SceneId::MissionSelect)),
            Key::Confirm if self.completed => Some(SceneCommand::Goto(SceneId::Playing)),
            Key::Action => {
                self.action(ctx);
                None
            }
            _ => None,
        }
    }

    fn action(&mut self, ctx: &mut SceneContext) {
        let Some(rocket) = &mut self.rocket else {
            return;
        };
        if rocket.launched {
            return;
        }
        if self.briefing_shown && !self.countdown_active {
            log::info!("Countdown started");
            self.countdown_active = true;
            self.countdown = COUNTDOWN_SECS;
        } else if self.countdown_active && self.countdown <= 0.0 && rocket.launch() {
            ctx.audio.play(SoundEffect::Launch);
            self.particles
                .spawn(Effect::explosion(GREY), self.pad + Vec2::new(0.0, 30.0));
        }
    }

    pub fn update(&mut self, dt: f32, ctx: &mut SceneContext) {
        self.particles.update(dt);
        let Some(rocket) = &mut self.rocket else {
            return;
        };
        rocket.update(dt);

        if self.countdown_active && self.countdown > 0.0 {
            self.countdown = (self.countdown - dt).max(0.0);
        }

        if rocket.is_mission_complete() && !self.completed {
            self.completed = true;
            self.complete(ctx);
        }
    }

    fn complete(&mut self, ctx: &mut SceneContext) {
        let Some(mission) = &self.mission else {
            return;
        };
        ctx.profile.add_knowledge(mission.points);
        ctx.profile.increment(Counter::MissionsCompleted);
        log::info!(
            "Mission complete: {} ({} total)",
            mission.name,
            ctx.profile.missions_completed
        );

        ctx.audio.play(SoundEffect::Success);
        self.particles.spawn(
            Effect::SuccessBurst,
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
        );
        let text = format!(
            "Mission Complete!\n\nCongratulations! You have successfully completed the {} mission.\n\n\
             Knowledge Points Earned: {}\nTotal Missions Completed: {}\n\n\
             Press ENTER to continue your journey.",
            mission.name, mission.points, ctx.profile.missions_completed
        );
        self.dialog.show(Dialog::info("Mission Success!", text));
    }

    pub fn render(&self, _ctx: &SceneContext, out: &mut DrawList) {
        // Sky gradient from space blue down to daylight
        let band = SCREEN_HEIGHT / SKY_BANDS as f32;
        for i in 0..SKY_BANDS {
            let t = i as f32 / SKY_BANDS as f32;
            let lerp = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * t) as u8;
            let color = [
                lerp(SPACE_BLUE[0], 100),
                lerp(SPACE_BLUE[1], 150),
                lerp(SPACE_BLUE[2], 200),
            ];
            out.rect(
                Vec2::new(0.0, i as f32 * band),
                Vec2::new(SCREEN_WIDTH, band),
                color,
                0.0,
            );
        }

        let launched = self.rocket.as_ref().is_some_and(|r| r.launched);
        if !launched {
            self.stars.render(out);
        }

        self.render_pad(launched, out);
        if let Some(rocket) = &self.rocket {
            rocket.render(out);
        }
        self.particles.render(out);
        self.render_ui(out);
        self.dialog.render(out);
    }

    fn render_pad(&self, launched: bool, out: &mut DrawList) {
        let base = self.pad + Vec2::new(-50.0, 30.0);
        out.rect(base, Vec2::new(100.0, 20.0), [100, 100, 100], 0.0);
        out.rect(base, Vec2::new(100.0, 20.0), WHITE, 2.0);

        let tower = Vec2::new(10.0, 80.0);
        out.rect(self.pad + Vec2::new(-60.0, -50.0), tower, [80, 80, 80], 0.0);
        out.rect(self.pad + Vec2::new(50.0, -50.0), tower, [80, 80, 80], 0.0);

        if !launched {
            out.line(
                self.pad + Vec2::new(-55.0, -20.0),
                self.pad + Vec2::new(-15.0, -10.0),
                2.0,
                YELLOW,
            );
            out.line(
                self.pad + Vec2::new(55.0, -20.0),
                self.pad + Vec2::new(15.0, -10.0),
                2.0,
                YELLOW,
            );
        }
    }

    fn render_ui(&self, out: &mut DrawList) {
        if let Some(mission) = &self.mission {
            out.text(
                Vec2::new(10.0, 10.0),
                format!("Mission: {}", mission.name),
                32.0,
                WHITE,
            );
        }

        let center_x = SCREEN_WIDTH / 2.0;
        if self.countdown_active {
            if self.countdown > 0.0 {
                out.text(
                    Vec2::new(center_x, 100.0),
                    format!("T-{}", self.countdown as u32 + 1),
                    48.0,
                    RED,
                );
            } else {
                out.text(Vec2::new(center_x, 100.0), "LAUNCH!", 48.0, GREEN);
            }
        }

        let Some(rocket) = &self.rocket else {
            out.text(
                Vec2::new(center_x, SCREEN_HEIGHT / 2.0),
                "No mission selected",
                32.0,
                WHITE,
            );
            return;
        };

        if rocket.launched {
            out.text(
                Vec2::new(10.0, 50.0),
                format!("Altitude: {:.1} km", rocket.altitude_km()),
                24.0,
                CYAN,
            );
            out.text(
                Vec2::new(10.0, 75.0),
                format!("Mission Progress: {:.1}%", rocket.mission_progress()),
                24.0,
                GREEN,
            );
            out.text(
                Vec2::new(10.0, 100.0),
                format!("Destination: {}", rocket.destination.name),
                24.0,
                WHITE,
            );
        }

        let instruction = if self.completed {
            "ENTER - Continue mission | ESC - Mission select"
        } else if !self.countdown_active && !rocket.launched {
            "Press SPACE to start countdown"
        } else if self.countdown <= 0.0 && !rocket.launched {
            "Press SPACE to LAUNCH!"
        } else {
            "ESC - Return to mission select"
        };
        out.text(
            Vec2::new(center_x, SCREEN_HEIGHT - 30.0),
            instruction,
            24.0,
            YELLOW,
        );
    }
}

fn briefing(mission: &Mission, rocket: &Rocket) -> String {
    format!(
        "Mission: {}\n\nObjective: {}\n\nDestination: {}\nDistance: {} km\n\n\
         Your rocket is fueled and ready for launch.\n\n\
         Press SPACE to begin countdown sequence!",
        mission.name,
        mission.description,
        rocket.destination.name,
        group_thousands(rocket.destination.distance_km as u64)
    )
}

/// `1234567` -> `"1,234,567"`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
