//! Star Cadet - an educational space-exploration game
//!
//! Core modules:
//! - `sim`: Simulation (entities, particles, interactions, mission quizzes)
//! - `scene`: Scene state machine and the playable modes
//! - `audio`: Procedural sound synthesis and playback
//! - `renderer`: Retained-mode draw list consumed by a presentation backend
//! - `settings`: Player preferences loaded from JSON
//! - `space_data`: NASA open-data client that degrades to empty results

pub mod achievements;
pub mod audio;
pub mod facts;
pub mod input;
pub mod profile;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod space_data;

pub use profile::PlayerProfile;
pub use scene::{SceneId, SceneManager};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (world units == pixels)
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 768.0;
    /// Target frame rate of the frame pump
    pub const FPS: u32 = 60;

    /// Player ship defaults
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_RADIUS: f32 = 15.0;

    /// Scan reach around the player
    pub const SCAN_RADIUS: f32 = 80.0;
    /// Extra reach when docking with a station
    pub const STATION_DOCK_MARGIN: f32 = 20.0;
    /// Extra reach for planet info in the solar-system explorer
    pub const PLANET_INFO_MARGIN: f32 = 30.0;
    /// Maximum distance for a satellite data link
    pub const SATELLITE_LINK_RANGE: f32 = 60.0;

    /// Solar-system time-scale bounds
    pub const TIME_SCALE_MIN: f32 = 0.1;
    pub const TIME_SCALE_MAX: f32 = 5.0;
    pub const TIME_SCALE_STEP: f32 = 0.5;

    /// Solar-system zoom bounds
    pub const ZOOM_MIN: f32 = 0.5;
    pub const ZOOM_MAX: f32 = 2.0;
    pub const ZOOM_STEP: f32 = 0.2;
}

/// RGB colour
pub type Color = [u8; 3];

/// Retro space palette
pub mod palette {
    use super::Color;

    pub const BLACK: Color = [0, 0, 0];
    pub const WHITE: Color = [255, 255, 255];
    pub const BLUE: Color = [0, 100, 200];
    pub const GREEN: Color = [0, 200, 100];
    pub const RED: Color = [200, 50, 50];
    pub const YELLOW: Color = [255, 255, 0];
    pub const ORANGE: Color = [255, 100, 0];
    pub const PURPLE: Color = [150, 0, 200];
    pub const CYAN: Color = [0, 255, 255];
    pub const GREY: Color = [150, 150, 150];
    pub const DARK_GREY: Color = [50, 50, 50];
    pub const SPACE_BLUE: Color = [10, 20, 40];

    pub const EARTH: Color = [100, 150, 255];
    pub const MARS: Color = [200, 100, 50];
    pub const MOON: Color = [200, 200, 200];
    pub const JUPITER: Color = [255, 200, 100];
}

/// Wrap a coordinate into `[0, size)`
#[inline]
pub fn wrap(value: f32, size: f32) -> f32 {
    let r = value.rem_euclid(size);
    // Tiny negatives round up to `size`
    if r >= size { 0.0 } else { r }
}

/// Convert polar (r, theta) around `center` to cartesian
#[inline]
pub fn orbit_position(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Euclidean overlap test between two circles, with an optional extra margin
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32, margin: f32) -> bool {
    a.distance(b) < ra + rb + margin
}
