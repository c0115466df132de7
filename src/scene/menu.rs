//! Title screen

use glam::Vec2;

use super::{SceneCommand, SceneContext, SceneId, Starfield};
use crate::audio::SoundEffect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{Key, KeyEvent};
use crate::palette::{CYAN, WHITE, YELLOW};
use crate::renderer::DrawList;

pub const OPTIONS: [&str; 6] = [
    "Start Mission",
    "Solar System Explorer",
    "Achievements",
    "Mission Archive",
    "Settings",
    "Exit",
];

#[derive(Debug, Clone)]
pub struct MenuScene {
    selected: usize,
    title_animation: f32,
    stars: Starfield,
}

impl MenuScene {
    pub fn enter(ctx: &mut SceneContext) -> Self {
        Self {
            selected: 0,
            title_animation: 0.0,
            stars: Starfield::new(ctx.next_seed()),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle_event(
        &mut self,
        event: &KeyEvent,
        ctx: &mut SceneContext,
    ) -> Option<SceneCommand> {
        if !event.pressed {
            return None;
        }
        match event.key {
            Key::Up => {
                self.selected = (self.selected + OPTIONS.len() - 1) % OPTIONS.len();
                None
            }
            Key::Down => {
                self.selected = (self.selected + 1) % OPTIONS.len();
                None
            }
            Key::Confirm => {
                ctx.audio.play(SoundEffect::MenuSelect);
                self.select()
            }
            _ => None,
        }
    }

    fn select(&self) -> Option<SceneCommand> {
        match self.selected {
            0 => Some(SceneCommand::Goto(SceneId::MissionSelect)),
            1 => Some(SceneCommand::Goto(SceneId::SolarSystem)),
            2 => Some(SceneCommand::Goto(SceneId::Achievements)),
            5 => Some(SceneCommand::Quit),
            other => {
                log::info!("{} is not available yet", OPTIONS[other]);
                None
            }
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.title_animation += dt * 2.0;
    }

    pub fn render(&self, out: &mut DrawList) {
        self.stars.render(out);

        let center_x = SCREEN_WIDTH / 2.0;
        let title_y = 150.0 + 10.0 * (self.title_animation * 50.0).to_radians().cos();
        out.text(Vec2::new(center_x, title_y), "STAR CADET", 48.0, CYAN);
        out.text(
            Vec2::new(center_x, title_y + 60.0),
            "Connecting Minds to Conquer Space",
            32.0,
            WHITE,
        );

        for (i, option) in OPTIONS.iter().enumerate() {
            let pos = Vec2::new(center_x, 350.0 + i as f32 * 50.0);
            if i == self.selected {
                out.text(pos, *option, 32.0, YELLOW);
                out.rect(pos - Vec2::new(150.0, 18.0), Vec2::new(300.0, 36.0), YELLOW, 2.0);
            } else {
                out.text(pos, *option, 32.0, WHITE);
            }
        }

        out.text(
            Vec2::new(center_x, SCREEN_HEIGHT - 50.0),
            "Use UP/DOWN to navigate, ENTER to select",
            24.0,
            WHITE,
        );
    }
}
