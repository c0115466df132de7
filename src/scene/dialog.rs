//! Modal dialog overlay
//!
//! While a dialog is open it swallows every key event. Scenes check
//! [`DialogState::is_active`] before starting a new interaction.

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{Key, KeyEvent};
use crate::palette::{BLACK, CYAN, WHITE, YELLOW};
use crate::renderer::DrawList;
use crate::sim::objective::Question;

const BOX_SIZE: Vec2 = Vec2::new(600.0, 400.0);
/// Characters per wrapped line in info dialogs
const WRAP_COLUMNS: usize = 52;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Info { title: String, text: String },
    Question(Question),
}

impl Dialog {
    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Dialog::Info {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// What the dialog did with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// No dialog open; the scene should handle the event
    NotActive,
    /// Swallowed with no further effect
    Consumed,
    /// Dialog closed by the player
    Dismissed,
    /// Question answered with this option index; dialog closed
    Answered(usize),
}

#[derive(Debug, Clone, Default)]
pub struct DialogState {
    current: Option<Dialog>,
}

impl DialogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `dialog`, replacing anything already shown
    pub fn show(&mut self, dialog: Dialog) {
        self.current = Some(dialog);
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Dialog> {
        self.current.as_ref()
    }

    pub fn handle_input(&mut self, event: &KeyEvent) -> DialogOutcome {
        let Some(dialog) = &self.current else {
            return DialogOutcome::NotActive;
        };
        if !event.pressed {
            return DialogOutcome::Consumed;
        }

        let outcome = match (dialog, event.key) {
            (_, Key::Cancel) | (Dialog::Info { .. }, Key::Action | Key::Confirm) => {
                DialogOutcome::Dismissed
            }
            (Dialog::Question(q), Key::Digit(d)) if d >= 1 && (d as usize) <= q.options.len() => {
                DialogOutcome::Answered(d as usize - 1)
            }
            _ => DialogOutcome::Consumed,
        };
        if outcome != DialogOutcome::Consumed {
            self.current = None;
        }
        outcome
    }

    pub fn render(&self, out: &mut DrawList) {
        let Some(dialog) = &self.current else {
            return;
        };

        out.shade(
            Vec2::ZERO,
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            BLACK,
            0.5,
        );
        let min = (Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) - BOX_SIZE) / 2.0;
        out.rect(min, BOX_SIZE, [20, 30, 50], 0.0);
        out.rect(min, BOX_SIZE, WHITE, 3.0);
        let center_x = min.x + BOX_SIZE.x / 2.0;
        let footer = Vec2::new(center_x, min.y + BOX_SIZE.y - 30.0);

        match dialog {
            Dialog::Info { title, text } => {
                out.text(Vec2::new(center_x, min.y + 40.0), title.clone(), 32.0, CYAN);
                for (i, line) in wrap_text(text, WRAP_COLUMNS).into_iter().enumerate() {
                    out.text(
                        Vec2::new(min.x + 20.0, min.y + 100.0 + i as f32 * 30.0),
                        line,
                        24.0,
                        WHITE,
                    );
                }
                out.text(footer, "Press SPACE or ENTER to continue", 20.0, YELLOW);
            }
            Dialog::Question(q) => {
                out.text(Vec2::new(center_x, min.y + 50.0), q.prompt.clone(), 24.0, WHITE);
                for (i, option) in q.options.iter().enumerate() {
                    out.text(
                        Vec2::new(min.x + 40.0, min.y + 120.0 + i as f32 * 40.0),
                        format!("{}. {option}", i + 1),
                        24.0,
                        WHITE,
                    );
                }
                out.text(footer, "Press 1-4 to select answer", 20.0, YELLOW);
            }
        }
    }
}

/// Greedy word wrap; explicit newlines start new paragraphs
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > columns {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MissionKind;

    fn question() -> Dialog {
        Dialog::Question(Question::bank(MissionKind::Collaboration).remove(0))
    }

    #[test]
    fn test_inactive_passes_through() {
        let mut d = DialogState::new();
        assert_eq!(d.handle_input(&KeyEvent::press(Key::Action)), DialogOutcome::NotActive);
    }

    #[test]
    fn test_info_dismissed_by_confirm_or_action() {
        let mut d = DialogState::new();
        d.show(Dialog::info("Hi", "there"));
        assert_eq!(d.handle_input(&KeyEvent::press(Key::Left)), DialogOutcome::Consumed);
        assert_eq!(d.handle_input(&KeyEvent::release(Key::Action)), DialogOutcome::Consumed);
        assert!(d.is_active());
        assert_eq!(d.handle_input(&KeyEvent::press(Key::Action)), DialogOutcome::Dismissed);
        assert!(!d.is_active());
    }

    #[test]
    fn test_question_needs_digit() {
        let mut d = DialogState::new();
        d.show(question());
        assert_eq!(d.handle_input(&KeyEvent::press(Key::Confirm)), DialogOutcome::Consumed);
        assert_eq!(d.handle_input(&KeyEvent::press(Key::Digit(7))), DialogOutcome::Consumed);
        assert_eq!(d.handle_input(&KeyEvent::press(Key::Digit(0))), DialogOutcome::Consumed);
        assert_eq!(d.handle_input(&KeyEvent::press(Key::Digit(2))), DialogOutcome::Answered(1));
        assert!(!d.is_active());
    }

    #[test]
    fn test_cancel_closes_anything() {
        let mut d = DialogState::new();
        d.show(question());
        assert_eq!(d.handle_input(&KeyEvent::press(Key::Cancel)), DialogOutcome::Dismissed);
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("one two three four\n\nfive", 9);
        assert_eq!(lines, vec!["one two", "three", "four", "", "five"]);
    }

    #[test]
    fn test_render_question_options() {
        let mut d = DialogState::new();
        d.show(question());
        let mut out = DrawList::new();
        d.render(&mut out);
        assert!(out.texts().any(|t| t == "2. 15"));
    }
}
