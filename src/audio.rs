//! Procedural audio
//!
//! Every sound effect is synthesized into a finite PCM buffer at startup;
//! no audio assets are loaded. Synthesis is a pure function of the sound
//! description, and volume is applied by the backend at playback time.

use std::collections::HashMap;
use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;

pub const SAMPLE_RATE: u32 = 22_050;
pub const BIT_DEPTH: u16 = 16;
pub const CHANNELS: u16 = 2;
pub const BUFFER_FRAMES: usize = 512;

const FULL_SCALE: f64 = i16::MAX as f64;

/// Errors raised while bringing up audio output
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("audio backend failed to initialize: {0}")]
    Init(String),

    #[error("unsupported audio format: {sample_rate} Hz, {bit_depth}-bit, {channels} channel(s)")]
    UnsupportedFormat {
        sample_rate: u32,
        bit_depth: u16,
        channels: u16,
    },
}

/// Output format negotiated with the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub bit_depth: u16,
    pub channels: u16,
    pub buffer_frames: usize,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            bit_depth: BIT_DEPTH,
            channels: CHANNELS,
            buffer_frames: BUFFER_FRAMES,
        }
    }
}

/// A waveform recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundKind {
    /// Sine with 10% fade in/out at 30% amplitude
    Beep { frequency: f64, duration: f64 },
    /// 2 s rumble rising from 60 Hz with seeded noise
    RocketLaunch { noise_seed: u64 },
    /// 0.8 s pulsing frequency sweep
    Scan,
    /// 1 s C-E-G-C arpeggio
    Success,
    /// 1.5 s approach, contact and lock phases
    Dock,
}

impl SoundKind {
    pub fn duration(&self) -> f64 {
        match *self {
            SoundKind::Beep { duration, .. } => duration,
            SoundKind::RocketLaunch { .. } => 2.0,
            SoundKind::Scan => 0.8,
            SoundKind::Success => 1.0,
            SoundKind::Dock => 1.5,
        }
    }
}

/// Interleaved stereo 16-bit PCM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    pub sample_rate: u32,
    frames: Vec<[i16; 2]>,
}

impl PcmBuffer {
    pub fn frames(&self) -> &[[i16; 2]] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value on either channel
    pub fn peak(&self) -> i32 {
        self.frames
            .iter()
            .flat_map(|f| f.iter())
            .map(|&s| (s as i32).abs())
            .max()
            .unwrap_or(0)
    }
}

/// Render a sound into a stereo buffer at `SAMPLE_RATE`
pub fn synthesize(kind: SoundKind) -> PcmBuffer {
    let rate = SAMPLE_RATE as f64;
    let frames = (kind.duration().max(0.0) * rate).round() as usize;

    let mut noise = match kind {
        SoundKind::RocketLaunch { noise_seed } => Some(Pcg32::seed_from_u64(noise_seed)),
        _ => None,
    };

    let mut out = Vec::with_capacity(frames);
    for i in 0..frames {
        let t = i as f64 / rate;
        let level = match kind {
            SoundKind::Beep { frequency, .. } => beep_sample(frequency, i, frames, t),
            SoundKind::RocketLaunch { .. } => {
                let n: f64 = noise
                    .as_mut()
                    .map(|rng| rng.random_range(-0.05..0.05))
                    .unwrap_or(0.0);
                rocket_sample(t, n)
            }
            SoundKind::Scan => scan_sample(t),
            SoundKind::Success => success_sample(t),
            SoundKind::Dock => dock_sample(t),
        };
        let sample = (level * FULL_SCALE).clamp(i16::MIN as f64, FULL_SCALE) as i16;
        out.push([sample, sample]);
    }

    PcmBuffer {
        sample_rate: SAMPLE_RATE,
        frames: out,
    }
}

fn beep_sample(frequency: f64, i: usize, frames: usize, t: f64) -> f64 {
    let fade = 0.1 * frames as f64;
    let envelope = if fade > 0.0 {
        1.0_f64
            .min(i as f64 / fade)
            .min((frames - i) as f64 / fade)
    } else {
        1.0
    };
    (TAU * frequency * t).sin() * envelope * 0.3
}

fn rocket_sample(t: f64, noise: f64) -> f64 {
    let frequency = 60.0 + 20.0 * t;
    let wave = (TAU * frequency * t).sin() * 0.3 + noise * 0.2;
    let fade_in = (t / 0.5).min(1.0);
    wave * fade_in * 0.4
}

fn scan_sample(t: f64) -> f64 {
    let frequency = 200.0 + 100.0 * (8.0 * t).sin();
    let wave = (TAU * frequency * t).sin();
    let pulse = (1.0 + (TAU * 20.0 * t).sin()) / 2.0;
    let decay = (1.0 - t / 0.8).max(0.0);
    wave * pulse * decay * 0.2
}

const SUCCESS_NOTES: [f64; 4] = [261.63, 329.63, 392.00, 523.25];
/// Gap between note onsets in the success jingle (seconds)
const SUCCESS_NOTE_STEP: f64 = 0.2;

fn success_note(j: usize, t: f64) -> f64 {
    let onset = j as f64 * SUCCESS_NOTE_STEP;
    if t < onset {
        return 0.0;
    }
    let local = t - onset;
    let envelope = (1.0 - local / 0.4).max(0.0);
    (TAU * SUCCESS_NOTES[j] * local).sin() * envelope * 0.25
}

fn success_sample(t: f64) -> f64 {
    let mix: f64 = (0..SUCCESS_NOTES.len()).map(|j| success_note(j, t)).sum();
    mix * 0.3
}

fn dock_sample(t: f64) -> f64 {
    let wave = if t < 0.5 {
        // Approach
        let frequency = 150.0 + 50.0 * t;
        (TAU * frequency * t).sin() * 0.3
    } else if t < 1.0 {
        // Contact clunks
        let bump = if (t * 20.0) as i64 % 2 == 1 { 0.1 } else { 0.0 };
        (TAU * 200.0 * t).sin() * 0.4 + bump
    } else {
        // Lock
        (TAU * 300.0 * t).sin() * 0.2
    };
    let envelope = if t > 0.5 { (1.0 - (t - 0.5)).max(0.0) } else { 1.0 };
    wave * envelope * 0.3
}

/// Named effects the game plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Generic blip, also used for wrong answers
    Beep,
    /// Menu confirm
    MenuSelect,
    /// Rocket ignition
    Launch,
    /// Asteroid scan
    Scan,
    /// Arrival, correct answer, mission complete
    Success,
    /// Station docking
    Dock,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 6] = [
        SoundEffect::Beep,
        SoundEffect::MenuSelect,
        SoundEffect::Launch,
        SoundEffect::Scan,
        SoundEffect::Success,
        SoundEffect::Dock,
    ];

    pub fn recipe(&self, seed: u64) -> SoundKind {
        match self {
            SoundEffect::Beep => SoundKind::Beep {
                frequency: 440.0,
                duration: 0.1,
            },
            SoundEffect::MenuSelect => SoundKind::Beep {
                frequency: 880.0,
                duration: 0.05,
            },
            SoundEffect::Launch => SoundKind::RocketLaunch { noise_seed: seed },
            SoundEffect::Scan => SoundKind::Scan,
            SoundEffect::Success => SoundKind::Success,
            SoundEffect::Dock => SoundKind::Dock,
        }
    }
}

/// Sink for synthesized buffers
pub trait AudioBackend {
    fn init(&mut self, format: &AudioFormat) -> Result<(), AudioError>;

    /// Queue `buffer` at `volume` (already clamped to [0, 1])
    fn play(&mut self, effect: SoundEffect, buffer: &PcmBuffer, volume: f32);
}

/// Backend that accepts the standard format and discards output
#[derive(Debug, Default)]
pub struct NullBackend {
    pub plays: usize,
}

impl AudioBackend for NullBackend {
    fn init(&mut self, format: &AudioFormat) -> Result<(), AudioError> {
        if format.bit_depth != BIT_DEPTH || format.channels == 0 || format.sample_rate == 0 {
            return Err(AudioError::UnsupportedFormat {
                sample_rate: format.sample_rate,
                bit_depth: format.bit_depth,
                channels: format.channels,
            });
        }
        Ok(())
    }

    fn play(&mut self, effect: SoundEffect, buffer: &PcmBuffer, volume: f32) {
        self.plays += 1;
        log::trace!("{effect:?}: {} frames at {volume:.2}", buffer.len());
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    buffers: HashMap<SoundEffect, PcmBuffer>,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    last_played: Option<SoundEffect>,
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("sfx_volume", &self.sfx_volume)
            .field("music_volume", &self.music_volume)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

impl AudioManager {
    /// Initialize the backend and pre-render every effect
    pub fn new(
        mut backend: Box<dyn AudioBackend>,
        settings: &Settings,
    ) -> Result<Self, AudioError> {
        backend.init(&AudioFormat::default())?;

        let buffers = SoundEffect::ALL
            .iter()
            .map(|&effect| (effect, synthesize(effect.recipe(settings.seed))))
            .collect();

        let mut manager = Self {
            backend,
            buffers,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: settings.muted,
            last_played: None,
        };
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        log::info!("Audio ready ({} effects)", manager.buffers.len());
        Ok(manager)
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    /// Most recently requested effect
    pub fn last_played(&self) -> Option<SoundEffect> {
        self.last_played
    }

    pub fn play(&mut self, effect: SoundEffect) {
        self.last_played = Some(effect);
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(buffer) = self.buffers.get(&effect) else {
            return;
        };
        log::debug!("Playing {effect:?}");
        self.backend.play(effect, buffer, vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_beep_length_amplitude_and_fades() {
        let buf = synthesize(SoundKind::Beep {
            frequency: 440.0,
            duration: 0.1,
        });
        let expected = (0.1_f64 * SAMPLE_RATE as f64).round() as usize;
        assert_eq!(buf.len(), expected);

        let limit = (0.3 * FULL_SCALE) as i32;
        let peak = buf.peak();
        assert!(peak <= limit, "peak {peak} over {limit}");

        let edge = expected / 10;
        let frames = buf.frames();
        for frame in frames[..edge].iter().chain(frames[expected - edge..].iter()) {
            assert_eq!(frame[0], frame[1]);
            assert!((frame[0] as i32).abs() < peak);
        }
    }

    #[test]
    fn test_fixed_lengths() {
        let rate = SAMPLE_RATE as usize;
        assert_eq!(synthesize(SoundKind::RocketLaunch { noise_seed: 1 }).len(), 2 * rate);
        assert_eq!(synthesize(SoundKind::Scan).len(), (0.8 * rate as f64).round() as usize);
        assert_eq!(synthesize(SoundKind::Success).len(), rate);
        assert_eq!(synthesize(SoundKind::Dock).len(), (1.5 * rate as f64).round() as usize);
    }

    #[test]
    fn test_deterministic() {
        for kind in [
            SoundKind::RocketLaunch { noise_seed: 7 },
            SoundKind::Scan,
            SoundKind::Success,
            SoundKind::Dock,
        ] {
            assert_eq!(synthesize(kind), synthesize(kind));
        }
        assert_ne!(
            synthesize(SoundKind::RocketLaunch { noise_seed: 1 }),
            synthesize(SoundKind::RocketLaunch { noise_seed: 2 })
        );
    }

    #[test]
    fn test_launch_fades_in_and_scan_decays() {
        let launch = synthesize(SoundKind::RocketLaunch { noise_seed: 3 });
        assert_eq!(launch.frames()[0], [0, 0]);

        let scan = synthesize(SoundKind::Scan);
        let tail = &scan.frames()[scan.len() - 20..];
        assert!(tail.iter().all(|f| (f[0] as i32).abs() < 200));
    }

    #[test]
    fn test_dock_envelope_decays_after_half_second() {
        let rate = SAMPLE_RATE as f64;
        let peak_between = |from: f64, to: f64| {
            ((from * rate) as usize..(to * rate) as usize)
                .map(|i| dock_sample(i as f64 / rate).abs())
                .fold(0.0, f64::max)
        };
        let approach = peak_between(0.4, 0.5);
        let lock = peak_between(1.2, 1.5);
        assert!(approach > 0.08, "approach peak {approach}");
        assert!(lock <= 0.2 * 0.3 * 0.3 + 1e-9, "lock peak {lock}");
        assert!(lock < approach / 4.0);
    }

    #[test]
    fn test_dock_contact_bump() {
        // Carrier zero crossings: only the bump is left
        let odd_slot = 0.5625;
        let even_slot = 0.6125;
        let envelope = 1.0 - (odd_slot - 0.5);
        assert!((dock_sample(odd_slot) - 0.1 * envelope * 0.3).abs() < 1e-9);
        assert!(dock_sample(even_slot).abs() < 1e-9);
    }

    #[test]
    fn test_success_notes_start_on_steps() {
        let rate = SAMPLE_RATE as f64;
        for k in 0..SUCCESS_NOTES.len() {
            let start = (k as f64 * SUCCESS_NOTE_STEP * rate).round() as usize;
            for i in start.saturating_sub(50)..start {
                assert_eq!(success_note(k, i as f64 / rate), 0.0, "note {k} early at {i}");
            }
            assert!(
                (start + 1..start + 50).all(|i| success_note(k, i as f64 / rate) != 0.0),
                "note {k} silent after {start}"
            );
        }

        // The buffer carries only the first note before the second onset
        let buf = synthesize(SoundKind::Success);
        let second = (SUCCESS_NOTE_STEP * rate).round() as usize;
        for i in second - 50..second {
            let t = i as f64 / rate;
            let expected = (success_note(0, t) * 0.3 * FULL_SCALE) as i16;
            assert_eq!(buf.frames()[i][0], expected);
        }
    }

    #[test]
    fn test_zero_duration_beep_is_empty() {
        let buf = synthesize(SoundKind::Beep {
            frequency: 440.0,
            duration: 0.0,
        });
        assert!(buf.is_empty());
        assert_eq!(buf.peak(), 0);
    }

    struct Recorder(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl AudioBackend for Recorder {
        fn init(&mut self, _format: &AudioFormat) -> Result<(), AudioError> {
            Ok(())
        }

        fn play(&mut self, effect: SoundEffect, _buffer: &PcmBuffer, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    struct Broken;

    impl AudioBackend for Broken {
        fn init(&mut self, _format: &AudioFormat) -> Result<(), AudioError> {
            Err(AudioError::Init("no device".into()))
        }

        fn play(&mut self, _effect: SoundEffect, _buffer: &PcmBuffer, _volume: f32) {}
    }

    #[test]
    fn test_volume_is_clamped_and_applied_at_playback() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio =
            AudioManager::new(Box::new(Recorder(log.clone())), &Settings::default()).expect("init");

        audio.set_sfx_volume(3.0);
        assert_eq!(audio.sfx_volume(), 1.0);
        audio.set_music_volume(-1.0);
        assert_eq!(audio.music_volume(), 0.0);

        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::Scan);
        audio.set_muted(true);
        audio.play(SoundEffect::Dock);

        assert_eq!(*log.borrow(), vec![(SoundEffect::Scan, 0.5)]);
        assert_eq!(audio.last_played(), Some(SoundEffect::Dock));
    }

    #[test]
    fn test_backend_failure_is_reported() {
        let err = AudioManager::new(Box::new(Broken), &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("no device"));
    }

    #[test]
    fn test_null_backend_rejects_bad_format() {
        let mut backend = NullBackend::default();
        let format = AudioFormat {
            bit_depth: 8,
            ..AudioFormat::default()
        };
        assert!(matches!(
            backend.init(&format),
            Err(AudioError::UnsupportedFormat { bit_depth: 8, .. })
        ));
        assert!(backend.init(&AudioFormat::default()).is_ok());
    }
}
