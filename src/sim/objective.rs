//! Mission quizzes
//!
//! Each mission kind carries an ordered question bank. Correct answers push
//! progress up by a fixed step and advance to the next question.

use serde::{Deserialize, Serialize};

use crate::profile::MissionKind;

pub const MAX_PROGRESS: u32 = 100;
/// Progress awarded per correct answer
pub const PROGRESS_PER_ANSWER: u32 = 25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
}

impl Question {
    fn new(prompt: &str, options: [&str; 4], correct: usize, explanation: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct,
            explanation: explanation.to_string(),
        }
    }

    /// Question bank for a mission kind
    pub fn bank(kind: MissionKind) -> Vec<Question> {
        match kind {
            MissionKind::Exploration => vec![
                Question::new(
                    "What is the average distance from Earth to Mars?",
                    ["225 million km", "54.6 million km", "401 million km", "150 million km"],
                    0,
                    "Mars is on average 225 million km from Earth, but this varies greatly due to orbital mechanics.",
                ),
                Question::new(
                    "Which rover was the first to successfully land on Mars?",
                    ["Curiosity", "Sojourner", "Opportunity", "Perseverance"],
                    1,
                    "Sojourner was part of the Mars Pathfinder mission in 1997, the first successful rover on Mars.",
                ),
            ],
            MissionKind::Research => vec![
                Question::new(
                    "What method do we use to detect exoplanets?",
                    ["Direct imaging", "Transit method", "Radial velocity", "All of the above"],
                    3,
                    "Scientists use multiple methods including transit photometry, radial velocity, and direct imaging.",
                ),
                Question::new(
                    "What is the habitable zone around a star?",
                    ["Where life exists", "Where water can be liquid", "The asteroid belt", "The magnetic field"],
                    1,
                    "The habitable zone is where temperatures allow liquid water to exist on a planet's surface.",
                ),
            ],
            MissionKind::Collaboration => vec![Question::new(
                "How many countries participate in the ISS program?",
                ["5", "15", "25", "50"],
                1,
                "The ISS is a collaboration between 15 countries including USA, Russia, Japan, Canada, and 11 European nations.",
            )],
            MissionKind::ProblemSolving => vec![Question::new(
                "What is the main threat from near-Earth asteroids?",
                ["Radiation", "Impact collision", "Gravitational pull", "Magnetic interference"],
                1,
                "The primary concern is potential impact with Earth, which could cause significant damage.",
            )],
        }
    }
}

/// Outcome of answering the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionObjective {
    pub kind: MissionKind,
    questions: Vec<Question>,
    current: usize,
    progress: u32,
}

impl MissionObjective {
    pub fn new(kind: MissionKind) -> Self {
        Self::with_questions(kind, Question::bank(kind))
    }

    pub fn with_questions(kind: MissionKind, questions: Vec<Question>) -> Self {
        Self {
            kind,
            questions,
            current: 0,
            progress: 0,
        }
    }

    /// Always within `0..=MAX_PROGRESS`
    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn answer(&mut self, choice: usize) -> Option<AnswerResult> {
        let question = self.questions.get(self.current)?;
        let correct = choice == question.correct;
        let explanation = question.explanation.clone();
        if correct {
            self.progress = (self.progress + PROGRESS_PER_ANSWER).min(MAX_PROGRESS);
            self.current += 1;
        }
        Some(AnswerResult {
            correct,
            explanation,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= MAX_PROGRESS || self.current >= self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bank_sizes() {
        assert_eq!(Question::bank(MissionKind::Exploration).len(), 2);
        assert_eq!(Question::bank(MissionKind::Research).len(), 2);
        assert_eq!(Question::bank(MissionKind::Collaboration).len(), 1);
        assert_eq!(Question::bank(MissionKind::ProblemSolving).len(), 1);
    }

    #[test]
    fn test_wrong_answer_changes_nothing() {
        let mut obj = MissionObjective::new(MissionKind::Exploration);
        let result = obj.answer(2).expect("question pending");
        assert!(!result.correct);
        assert_eq!(obj.progress(), 0);
        assert_eq!(obj.current_index(), 0);
    }

    #[test]
    fn test_completes_when_questions_exhausted() {
        let mut obj = MissionObjective::new(MissionKind::Exploration);
        assert!(obj.answer(0).is_some_and(|r| r.correct));
        assert!(obj.answer(1).is_some_and(|r| r.correct));
        assert_eq!(obj.progress(), 50);
        assert!(obj.is_complete());
        assert!(obj.current_question().is_none());
        assert!(obj.answer(0).is_none());
    }

    #[test]
    fn test_progress_caps_at_max() {
        let questions: Vec<Question> = (0..6)
            .map(|_| Question::new("q", ["a", "b", "c", "d"], 0, "e"))
            .collect();
        let mut obj = MissionObjective::with_questions(MissionKind::Research, questions);
        for _ in 0..4 {
            obj.answer(0);
        }
        assert_eq!(obj.progress(), MAX_PROGRESS);
        assert!(obj.is_complete());
        obj.answer(0);
        assert_eq!(obj.progress(), MAX_PROGRESS);
    }

    proptest! {
        #[test]
        fn prop_progress_bounded(answers in proptest::collection::vec(0usize..4, 0..20)) {
            let questions: Vec<Question> = (0..8)
                .map(|i| Question::new("q", ["a", "b", "c", "d"], i % 4, "e"))
                .collect();
            let total = questions.len();
            let mut obj = MissionObjective::with_questions(MissionKind::Exploration, questions);
            for a in answers {
                obj.answer(a);
                prop_assert!(obj.progress() <= MAX_PROGRESS);
                let expected = obj.progress() >= MAX_PROGRESS || obj.current_index() >= total;
                prop_assert_eq!(obj.is_complete(), expected);
            }
        }
    }
}
