//! Proximity-driven gameplay events
//!
//! Detection is read-only: it reports which entity the player reached and
//! leaves applying the event (visit, dock, scan) to the caller.

use glam::Vec2;

use crate::circles_touch;
use crate::consts::{SCAN_RADIUS, STATION_DOCK_MARGIN};
use crate::sim::asteroid::Asteroid;
use crate::sim::planet::Planet;
use crate::sim::player::Player;
use crate::sim::station::SpaceStation;

/// A detected interaction, by index into the scene's entity lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Arrival { planet: usize },
    Dock { station: usize },
    Scan { asteroid: usize },
}

/// Unvisited planets the player is touching
pub fn arrivals<'a>(
    player: &'a Player,
    planets: &'a [Planet],
) -> impl Iterator<Item = usize> + 'a {
    planets.iter().enumerate().filter_map(move |(i, planet)| {
        let touching = circles_touch(player.pos, player.radius, planet.pos, planet.radius, 0.0);
        (player.active && planet.active && !planet.visited && touching).then_some(i)
    })
}

/// Undocked stations within docking reach
pub fn docks<'a>(
    player: &'a Player,
    stations: &'a [SpaceStation],
) -> impl Iterator<Item = usize> + 'a {
    stations.iter().enumerate().filter_map(move |(i, station)| {
        let reach = circles_touch(
            player.pos,
            player.radius,
            station.pos,
            station.radius,
            STATION_DOCK_MARGIN,
        );
        (player.active && station.active && !station.docked && reach).then_some(i)
    })
}

/// First unscanned asteroid whose centre is within `radius` of `origin`
pub fn scan_target(origin: Vec2, radius: f32, asteroids: &[Asteroid]) -> Option<usize> {
    asteroids
        .iter()
        .position(|a| a.active && !a.scanned && origin.distance(a.pos) < radius)
}

/// Everything that fires this tick; a scan is only considered when requested
pub fn detect(
    player: &Player,
    planets: &[Planet],
    stations: &[SpaceStation],
    asteroids: &[Asteroid],
    scan_requested: bool,
) -> Vec<Interaction> {
    let mut events: Vec<Interaction> = arrivals(player, planets)
        .map(|planet| Interaction::Arrival { planet })
        .collect();
    events.extend(docks(player, stations).map(|station| Interaction::Dock { station }));
    if scan_requested && player.active {
        if let Some(asteroid) = scan_target(player.pos, SCAN_RADIUS, asteroids) {
            events.push(Interaction::Scan { asteroid });
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{EARTH, MARS};
    use crate::sim::asteroid::{Mineral, SizeClass};

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y))
    }

    #[test]
    fn test_scan_fires_once_for_unscanned_in_range() {
        let player = player_at(500.0, 400.0);
        let mut asteroids = vec![Asteroid::new(
            Vec2::new(550.0, 400.0),
            20.0,
            0.0,
            0.0,
            Mineral::Nickel,
        )];

        let events = detect(&player, &[], &[], &asteroids, true);
        assert_eq!(events, vec![Interaction::Scan { asteroid: 0 }]);

        let report = asteroids[0].scan().expect("unscanned");
        assert_eq!(report.value, 200);
        assert_eq!(report.size, SizeClass::Small);
        assert!(asteroids[0].scanned);

        assert!(detect(&player, &[], &[], &asteroids, true).is_empty());
    }

    #[test]
    fn test_scan_needs_request_and_range() {
        let player = player_at(0.0, 0.0);
        let asteroids = vec![
            Asteroid::new(Vec2::new(90.0, 0.0), 30.0, 0.0, 0.0, Mineral::Iron),
            Asteroid::new(Vec2::new(10.0, 0.0), 30.0, 0.0, 0.0, Mineral::Iron),
        ];
        assert!(detect(&player, &[], &[], &asteroids, false).is_empty());
        assert_eq!(scan_target(player.pos, SCAN_RADIUS, &asteroids), Some(1));
    }

    #[test]
    fn test_first_match_wins() {
        let asteroids = vec![
            Asteroid::new(Vec2::new(30.0, 0.0), 20.0, 0.0, 0.0, Mineral::Iron),
            Asteroid::new(Vec2::new(10.0, 0.0), 20.0, 0.0, 0.0, Mineral::Platinum),
        ];
        assert_eq!(scan_target(Vec2::ZERO, SCAN_RADIUS, &asteroids), Some(0));
    }

    #[test]
    fn test_arrival_gated_by_visited() {
        let player = player_at(100.0, 100.0);
        let mut planets = vec![
            Planet::new("Earth", Vec2::new(140.0, 100.0), EARTH),
            Planet::new("Mars", Vec2::new(600.0, 300.0), MARS),
        ];
        assert_eq!(arrivals(&player, &planets).collect::<Vec<_>>(), vec![0]);

        planets[0].mark_visited();
        assert_eq!(arrivals(&player, &planets).count(), 0);
    }

    #[test]
    fn test_inactive_entities_are_ignored() {
        let mut player = player_at(300.0, 600.0);
        let mut planets = vec![Planet::new("Earth", Vec2::new(300.0, 600.0), EARTH)];
        let mut stations = vec![SpaceStation::new("ISS", Vec2::new(300.0, 600.0))];
        let mut asteroids = vec![Asteroid::new(
            Vec2::new(310.0, 600.0),
            20.0,
            0.0,
            0.0,
            Mineral::Iron,
        )];
        assert_eq!(detect(&player, &planets, &stations, &asteroids, true).len(), 3);

        player.active = false;
        assert!(detect(&player, &planets, &stations, &asteroids, true).is_empty());

        player.active = true;
        planets[0].active = false;
        stations[0].active = false;
        asteroids[0].active = false;
        assert!(detect(&player, &planets, &stations, &asteroids, true).is_empty());
    }

    #[test]
    fn test_dock_margin() {
        let mut stations = vec![SpaceStation::new("ISS", Vec2::new(300.0, 600.0))];
        // 50 + 15 + 20 = 85
        assert_eq!(docks(&player_at(300.0, 516.0), &stations).count(), 1);
        assert_eq!(docks(&player_at(300.0, 514.0), &stations).count(), 0);

        stations[0].dock();
        assert_eq!(docks(&player_at(300.0, 600.0), &stations).count(), 0);
    }
}
