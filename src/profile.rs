//! Player progress shared across scenes
//!
//! Scenes mutate the profile only through the narrow operations below.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementId;

/// Mission categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionKind {
    Exploration,
    Research,
    Collaboration,
    ProblemSolving,
}

impl MissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionKind::Exploration => "Exploration",
            MissionKind::Research => "Research",
            MissionKind::Collaboration => "Collaboration",
            MissionKind::ProblemSolving => "Problem Solving",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }
}

/// A selectable mission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub name: String,
    pub kind: MissionKind,
    pub description: String,
    pub difficulty: Difficulty,
    /// Knowledge awarded on completion
    pub points: u32,
}

impl Mission {
    fn new(
        name: &str,
        kind: MissionKind,
        description: &str,
        difficulty: Difficulty,
        points: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            difficulty,
            points,
        }
    }

    /// The four missions offered on the selection screen, in display order
    pub fn catalogue() -> Vec<Mission> {
        vec![
            Mission::new(
                "Mars Rover Navigation",
                MissionKind::Exploration,
                "Guide a rover through Martian terrain using NASA data",
                Difficulty::Beginner,
                100,
            ),
            Mission::new(
                "ISS Collaboration",
                MissionKind::Collaboration,
                "Coordinate with international teams on space station",
                Difficulty::Intermediate,
                200,
            ),
            Mission::new(
                "Exoplanet Discovery",
                MissionKind::Research,
                "Analyze telescope data to find habitable worlds",
                Difficulty::Advanced,
                300,
            ),
            Mission::new(
                "Asteroid Defense",
                MissionKind::ProblemSolving,
                "Calculate trajectories to protect Earth",
                Difficulty::Expert,
                500,
            ),
        ]
    }
}

/// Activity counters tracked on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    MissionsCompleted,
    PlanetsVisited,
    AsteroidsScanned,
    StationsDocked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub missions_completed: u32,
    pub knowledge_points: u32,
    pub current_mission: Option<Mission>,
    pub planets_visited: u32,
    pub asteroids_scanned: u32,
    pub stations_docked: u32,
    pub achievements: BTreeSet<AchievementId>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            name: "Space Explorer".to_string(),
            missions_completed: 0,
            knowledge_points: 0,
            current_mission: None,
            planets_visited: 0,
            asteroids_scanned: 0,
            stations_docked: 0,
            achievements: BTreeSet::new(),
        }
    }
}

impl PlayerProfile {
    pub fn add_knowledge(&mut self, points: u32) {
        self.knowledge_points = self.knowledge_points.saturating_add(points);
        log::debug!("+{points} knowledge ({} total)", self.knowledge_points);
    }

    pub fn increment(&mut self, counter: Counter) {
        let slot = match counter {
            Counter::MissionsCompleted => &mut self.missions_completed,
            Counter::PlanetsVisited => &mut self.planets_visited,
            Counter::AsteroidsScanned => &mut self.asteroids_scanned,
            Counter::StationsDocked => &mut self.stations_docked,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn count(&self, counter: Counter) -> u32 {
        match counter {
            Counter::MissionsCompleted => self.missions_completed,
            Counter::PlanetsVisited => self.planets_visited,
            Counter::AsteroidsScanned => self.asteroids_scanned,
            Counter::StationsDocked => self.stations_docked,
        }
    }

    pub fn begin_mission(&mut self, mission: Mission) {
        log::info!("Mission selected: {}", mission.name);
        self.current_mission = Some(mission);
    }

    /// Record an achievement; true only when newly unlocked
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        self.achievements.insert(id)
    }

    pub fn has_unlocked(&self, id: AchievementId) -> bool {
        self.achievements.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order_and_points() {
        let missions = Mission::catalogue();
        let points: Vec<u32> = missions.iter().map(|m| m.points).collect();
        assert_eq!(points, vec![100, 200, 300, 500]);
        assert_eq!(missions[1].kind, MissionKind::Collaboration);
        assert_eq!(missions[3].difficulty, Difficulty::Expert);
    }

    #[test]
    fn test_counters() {
        let mut profile = PlayerProfile::default();
        profile.increment(Counter::AsteroidsScanned);
        profile.increment(Counter::AsteroidsScanned);
        profile.increment(Counter::StationsDocked);
        assert_eq!(profile.count(Counter::AsteroidsScanned), 2);
        assert_eq!(profile.stations_docked, 1);
        assert_eq!(profile.count(Counter::PlanetsVisited), 0);
    }

    #[test]
    fn test_unlock_once() {
        let mut profile = PlayerProfile::default();
        assert!(profile.unlock(AchievementId::FirstSteps));
        assert!(!profile.unlock(AchievementId::FirstSteps));
        assert!(profile.has_unlocked(AchievementId::FirstSteps));
    }

    #[test]
    fn test_begin_mission_replaces_current() {
        let mut profile = PlayerProfile::default();
        let missions = Mission::catalogue();
        profile.begin_mission(missions[0].clone());
        profile.begin_mission(missions[2].clone());
        assert_eq!(
            profile.current_mission.as_ref().map(|m| m.kind),
            Some(MissionKind::Research)
        );
    }
}
