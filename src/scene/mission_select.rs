//! Mission picker

use glam::Vec2;

use super::{SceneCommand, SceneContext, SceneId, Starfield};
use crate::audio::SoundEffect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{Key, KeyEvent};
use crate::palette::{BLUE, CYAN, GREEN, WHITE, YELLOW};
use crate::profile::Mission;
use crate::renderer::DrawList;

#[derive(Debug, Clone)]
pub struct MissionSelectScene {
    missions: Vec<Mission>,
    selected: usize,
    stars: Starfield,
}

impl MissionSelectScene {
    pub fn enter(ctx: &mut SceneContext) -> Self {
        Self {
            missions: Mission::catalogue(),
            selected: 0,
            stars: Starfield::new(ctx.next_seed()),
        }
    }

    pub fn selected(&self) -> Option<&Mission> {
        self.missions.get(self.selected)
    }

    pub fn handle_event(
        &mut self,
        event: &KeyEvent,
        ctx: &mut SceneContext,
    ) -> Option<SceneCommand> {
        if !event.pressed || self.missions.is_empty() {
            return None;
        }
        let count = self.missions.len();
        match event.key {
            Key::Up => self.selected = (self.selected + count - 1) % count,
            Key::Down => self.selected = (self.selected + 1) % count,
            Key::Confirm => {
                let mission = self.missions[self.selected].clone();
                ctx.audio.play(SoundEffect::MenuSelect);
                ctx.profile.begin_mission(mission);
                return Some(SceneCommand::Goto(SceneId::Launch));
            }
            Key::Cancel => return Some(SceneCommand::Goto(SceneId::Menu)),
            _ => {}
        }
        None
    }

    pub fn render(&self, out: &mut DrawList) {
        self.stars.render(out);
        out.text(Vec2::new(SCREEN_WIDTH / 2.0, 80.0), "Mission Selection", 48.0, CYAN);

        for (i, mission) in self.missions.iter().enumerate() {
            let y = 180.0 + i as f32 * 120.0;
            let card = Vec2::new(100.0, y - 10.0);
            let size = Vec2::new(SCREEN_WIDTH - 200.0, 100.0);
            let fill = if i == self.selected { BLUE } else { [20, 30, 50] };
            out.rect(card, size, fill, 0.0);
            out.rect(card, size, WHITE, 2.0);

            out.text(Vec2::new(120.0, y), mission.name.clone(), 32.0, WHITE);
            out.text(Vec2::new(120.0, y + 30.0), mission.description.clone(), 24.0, WHITE);
            out.text(
                Vec2::new(120.0, y + 50.0),
                format!("Difficulty: {}", mission.difficulty.as_str()),
                24.0,
                YELLOW,
            );
            out.text(
                Vec2::new(120.0, y + 70.0),
                format!("Points: {}", mission.points),
                24.0,
                GREEN,
            );
        }

        out.text(
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 30.0),
            "UP/DOWN Navigate | ENTER Start Mission | ESC Back",
            24.0,
            WHITE,
        );
    }
}
