//! Achievement gallery

use glam::Vec2;

use super::{SceneCommand, SceneContext, SceneId, Starfield};
use crate::achievements::{self, Achievement};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{Key, KeyEvent};
use crate::palette::{CYAN, DARK_GREY, GREEN, GREY, RED, WHITE, YELLOW};
use crate::renderer::DrawList;

#[derive(Debug, Clone)]
pub struct AchievementsScene {
    /// Unlocked by this visit
    newly_unlocked: Vec<Achievement>,
    stars: Starfield,
}

impl AchievementsScene {
    /// Re-evaluates every requirement against the profile
    pub fn enter(ctx: &mut SceneContext) -> Self {
        let newly_unlocked = achievements::check_unlocks(&mut ctx.profile);
        Self {
            newly_unlocked,
            stars: Starfield::new(ctx.next_seed()),
        }
    }

    pub fn newly_unlocked(&self) -> &[Achievement] {
        &self.newly_unlocked
    }

    pub fn handle_event(&mut self, event: &KeyEvent) -> Option<SceneCommand> {
        (event.pressed && event.key == Key::Cancel).then_some(SceneCommand::Goto(SceneId::Menu))
    }

    pub fn render(&self, ctx: &SceneContext, out: &mut DrawList) {
        self.stars.render(out);
        out.text(Vec2::new(SCREEN_WIDTH / 2.0, 80.0), "Achievements", 48.0, CYAN);

        for (i, achievement) in achievements::catalogue().iter().enumerate() {
            let y = 150.0 + i as f32 * 80.0;
            let unlocked = ctx.profile.has_unlocked(achievement.id);
            let card = Vec2::new(100.0, y);
            let size = Vec2::new(SCREEN_WIDTH - 200.0, 70.0);
            out.rect(card, size, if unlocked { GREEN } else { DARK_GREY }, 0.0);
            out.rect(card, size, WHITE, 2.0);

            let label = if unlocked { WHITE } else { GREY };
            out.text(Vec2::new(170.0, y + 10.0), achievement.name, 32.0, label);
            out.text(Vec2::new(170.0, y + 35.0), achievement.description, 24.0, label);

            let (status, color) = if unlocked {
                ("UNLOCKED".to_string(), YELLOW)
            } else {
                let (have, need) = achievement.requirement.progress(&ctx.profile);
                (format!("LOCKED {}/{}", have.min(need), need), RED)
            };
            out.text(Vec2::new(SCREEN_WIDTH - 200.0, y + 25.0), status, 24.0, color);
        }

        out.text(
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 30.0),
            "ESC - Return to menu",
            24.0,
            WHITE,
        );
    }
}
