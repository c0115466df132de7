//! Achievement catalogue
//!
//! Requirements are a closed set evaluated exhaustively against the profile.
//! Unlocked state lives on [`PlayerProfile`], not here.

use serde::{Deserialize, Serialize};

use crate::profile::{Counter, PlayerProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    FirstSteps,
    SpaceExplorer,
    KnowledgeSeeker,
    AsteroidMiner,
    InternationalCollaborator,
}

/// Threshold an achievement checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Counter { counter: Counter, at_least: u32 },
    Knowledge { at_least: u32 },
}

impl Requirement {
    pub fn is_met(&self, profile: &PlayerProfile) -> bool {
        match *self {
            Requirement::Counter { counter, at_least } => profile.count(counter) >= at_least,
            Requirement::Knowledge { at_least } => profile.knowledge_points >= at_least,
        }
    }

    /// Current value and target, for progress display
    pub fn progress(&self, profile: &PlayerProfile) -> (u32, u32) {
        match *self {
            Requirement::Counter { counter, at_least } => (profile.count(counter), at_least),
            Requirement::Knowledge { at_least } => (profile.knowledge_points, at_least),
        }
    }
}

/// A single catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub requirement: Requirement,
}

impl AchievementId {
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstSteps,
        AchievementId::SpaceExplorer,
        AchievementId::KnowledgeSeeker,
        AchievementId::AsteroidMiner,
        AchievementId::InternationalCollaborator,
    ];

    pub fn achievement(self) -> Achievement {
        let (name, description, requirement) = match self {
            AchievementId::FirstSteps => (
                "First Steps",
                "Complete your first mission",
                Requirement::Counter {
                    counter: Counter::MissionsCompleted,
                    at_least: 1,
                },
            ),
            AchievementId::SpaceExplorer => (
                "Space Explorer",
                "Visit all planets in the solar system",
                Requirement::Counter {
                    counter: Counter::PlanetsVisited,
                    at_least: 4,
                },
            ),
            AchievementId::KnowledgeSeeker => (
                "Knowledge Seeker",
                "Earn 500 knowledge points",
                Requirement::Knowledge { at_least: 500 },
            ),
            AchievementId::AsteroidMiner => (
                "Asteroid Miner",
                "Scan 10 asteroids",
                Requirement::Counter {
                    counter: Counter::AsteroidsScanned,
                    at_least: 10,
                },
            ),
            AchievementId::InternationalCollaborator => (
                "International Collaborator",
                "Dock with the International Space Station",
                Requirement::Counter {
                    counter: Counter::StationsDocked,
                    at_least: 1,
                },
            ),
        };
        Achievement {
            id: self,
            name,
            description,
            requirement,
        }
    }
}

/// Every achievement in display order
pub fn catalogue() -> Vec<Achievement> {
    AchievementId::ALL.iter().map(|id| id.achievement()).collect()
}

/// Unlock everything the profile now qualifies for
/// Returns the newly unlocked achievements (empty if nothing changed)
pub fn check_unlocks(profile: &mut PlayerProfile) -> Vec<Achievement> {
    let mut newly = Vec::new();
    for achievement in catalogue() {
        if achievement.requirement.is_met(profile) && profile.unlock(achievement.id) {
            log::info!("Achievement unlocked: {}", achievement.name);
            newly.push(achievement);
        }
    }
    newly
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_profile_unlocks_nothing() {
        let mut profile = PlayerProfile::default();
        assert!(check_unlocks(&mut profile).is_empty());
        assert!(profile.achievements.is_empty());
    }

    #[test]
    fn test_every_requirement_is_evaluated() {
        let mut profile = PlayerProfile::default();
        profile.increment(Counter::MissionsCompleted);
        profile.increment(Counter::StationsDocked);
        for _ in 0..4 {
            profile.increment(Counter::PlanetsVisited);
        }
        for _ in 0..10 {
            profile.increment(Counter::AsteroidsScanned);
        }
        profile.add_knowledge(500);

        let newly = check_unlocks(&mut profile);
        assert_eq!(newly.len(), AchievementId::ALL.len());
    }

    #[test]
    fn test_unlocks_are_reported_once() {
        let mut profile = PlayerProfile::default();
        profile.add_knowledge(600);
        let first = check_unlocks(&mut profile);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, AchievementId::KnowledgeSeeker);
        assert!(check_unlocks(&mut profile).is_empty());
    }

    #[test]
    fn test_progress_reports_target() {
        let mut profile = PlayerProfile::default();
        profile.increment(Counter::AsteroidsScanned);
        let miner = AchievementId::AsteroidMiner.achievement();
        assert_eq!(miner.requirement.progress(&profile), (1, 10));
        assert!(!miner.requirement.is_met(&profile));
    }
}
