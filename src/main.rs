//! Star Cadet entry point
//!
//! Headless driver: builds the scene manager and pumps a scripted play
//! session through it at a fixed frame rate. A windowed front end would
//! replace the script with real key events and rasterize each draw list.

use star_cadet::audio::{AudioError, AudioManager, NullBackend};
use star_cadet::consts::FPS;
use star_cadet::input::{Key, KeyEvent};
use star_cadet::renderer::DrawList;
use star_cadet::scene::{SceneContext, SceneManager};
use star_cadet::settings::Settings;
use star_cadet::space_data::{OfflineTransport, SpaceDataClient};

/// Hard stop in case the script stops driving toward Exit
const MAX_FRAMES: u64 = FPS as u64 * 300;

#[derive(thiserror::Error, Debug)]
enum StartupError {
    #[error("audio backend unavailable: {0}")]
    Audio(#[from] AudioError),
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Tap(Key),
    Hold(Key, f32),
    Wait(f32),
}

/// One mission from menu to exit
fn script() -> Vec<Step> {
    use Key::*;
    use Step::*;
    vec![
        Tap(Confirm),      // Start Mission
        Tap(Confirm),      // Mars Rover Navigation
        Tap(Action),       // dismiss briefing
        Tap(Action),       // start countdown
        Wait(10.5),
        Tap(Action),       // launch
        Wait(8.0),
        Tap(Confirm),      // dismiss success
        Tap(Confirm),      // continue to free flight
        Tap(Confirm),      // dismiss mission briefing
        Hold(Up, 1.0),
        Tap(Action),
        Wait(0.5),
        Tap(Cancel),
        Tap(Cancel),       // back to menu
        Tap(Down),
        Tap(Confirm),      // solar system
        Tap(TimeScaleUp),
        Tap(ZoomIn),
        Hold(Left, 0.5),
        Wait(2.0),
        Tap(Cancel),
        Tap(Down),
        Tap(Down),
        Tap(Confirm),      // achievements
        Wait(0.5),
        Tap(Cancel),
        Tap(Up),
        Tap(Confirm),      // exit
    ]
}

struct Driver {
    manager: SceneManager,
    frame: DrawList,
    frames: u64,
}

impl Driver {
    fn tick(&mut self) {
        self.manager.update(1.0 / FPS as f32);
        self.manager.render(&mut self.frame);
        self.frames += 1;
    }

    fn wait(&mut self, secs: f32) {
        let n = (secs * FPS as f32).round() as u64;
        for _ in 0..n {
            if !self.manager.is_running() || self.frames >= MAX_FRAMES {
                return;
            }
            self.tick();
        }
    }

    fn send(&mut self, event: KeyEvent) {
        self.manager.handle_event(event);
        self.tick();
    }

    fn step(&mut self, step: Step) {
        match step {
            Step::Tap(key) => {
                self.send(KeyEvent::press(key));
                self.send(KeyEvent::release(key));
            }
            Step::Hold(key, secs) => {
                self.send(KeyEvent::press(key));
                self.wait(secs);
                self.send(KeyEvent::release(key));
            }
            Step::Wait(secs) => self.wait(secs),
        }
    }
}

fn run(settings: Settings) -> Result<(), StartupError> {
    let audio = AudioManager::new(Box::new(NullBackend::default()), &settings)?;

    let client = SpaceDataClient::from_env(OfflineTransport);
    if let Some(apod) = client.apod() {
        log::info!("Picture of the day: {} ({})", apod.title, apod.date);
    }

    let mut driver = Driver {
        manager: SceneManager::new(SceneContext::new(settings, audio)),
        frame: DrawList::new(),
        frames: 0,
    };

    for step in script() {
        if !driver.manager.is_running() {
            break;
        }
        driver.step(step);
    }

    let profile = &driver.manager.context().profile;
    log::info!(
        "Session over after {} frames: {} missions, {} knowledge, {} achievements, last scene {}",
        driver.frames,
        profile.missions_completed,
        profile.knowledge_points,
        profile.achievements.len(),
        driver.manager.current().as_str()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Star Cadet starting...");

    let settings = Settings::load();
    if let Err(e) = run(settings) {
        log::error!("Startup failed: {e}");
        std::process::exit(1);
    }
}
