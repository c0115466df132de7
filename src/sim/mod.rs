//! Simulation module
//!
//! Entity kinematics, particles, interaction detection and mission quizzes.
//! Nothing here draws to a real surface or plays audio:
//! - Explicit `dt` integration only
//! - Seeded RNG only
//! - Rendering goes through `DrawList` and never mutates state

pub mod asteroid;
pub mod interaction;
pub mod objective;
pub mod orbit;
pub mod particles;
pub mod planet;
pub mod player;
pub mod rocket;
pub mod station;

pub use asteroid::{Asteroid, Mineral, ScanReport, SizeClass};
pub use interaction::{Interaction, detect};
pub use objective::{AnswerResult, MissionObjective, Question};
pub use orbit::{DataLink, Satellite, SatelliteKind, SolarSystem};
pub use particles::{Effect, Particle, ParticleEngine};
pub use planet::{Planet, PlanetDetails};
pub use player::Player;
pub use rocket::{Destination, FlightPhase, Rocket};
pub use station::{DockReport, SpaceStation};
