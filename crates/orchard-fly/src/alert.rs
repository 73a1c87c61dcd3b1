//! Shared flee alert
//!
//! One alert serves every fly in a swarm. When many flies bolt in the same
//! frame only the first one gets to start the sound; the rest see it playing
//! and stay quiet. The handle is single-threaded (`Rc<RefCell<_>>`); a
//! threaded world would need to put it behind a mutex.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Reference to a sound asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundClip {
    pub name: String,
    /// Clip length at normal pitch (seconds)
    pub length_secs: f32,
}

impl SoundClip {
    pub fn new(name: impl Into<String>, length_secs: f32) -> Self {
        Self {
            name: name.into(),
            length_secs,
        }
    }
}

impl Default for SoundClip {
    fn default() -> Self {
        Self::new("fly_buzz", 1.2)
    }
}

/// Playback settings applied to the alert source when it is created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub volume: f32,
    pub pitch: f32,
    pub looping: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        // The buzz gets grating at full volume and is shrill at normal pitch
        Self {
            volume: 0.65,
            pitch: 0.8,
            looping: false,
        }
    }
}

/// Something that can play the alert clip
pub trait AlertSource {
    fn play(&mut self, clip: &SoundClip);

    fn is_playing(&self) -> bool;

    /// Advance playback by one frame
    fn advance(&mut self, _dt: f32) {}
}

/// Headless alert source that only tracks playback time
///
/// Pitch and looping shape playback length. Volume has no effect here and is
/// carried in `settings()` for sources that produce real audio.
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    settings: AlertSettings,
    current: Option<String>,
    remaining: f32,
}

impl ClipPlayer {
    pub fn new(settings: AlertSettings) -> Self {
        Self {
            settings,
            current: None,
            remaining: 0.0,
        }
    }

    pub fn settings(&self) -> &AlertSettings {
        &self.settings
    }

    /// Name of the clip last started, if it is still playing
    pub fn current_clip(&self) -> Option<&str> {
        if self.is_playing() {
            self.current.as_deref()
        } else {
            None
        }
    }
}

impl AlertSource for ClipPlayer {
    fn play(&mut self, clip: &SoundClip) {
        // Lower pitch stretches playback
        let pitch = if self.settings.pitch > 0.0 {
            self.settings.pitch
        } else {
            1.0
        };
        self.current = Some(clip.name.clone());
        self.remaining = clip.length_secs.max(0.0) / pitch;
    }

    fn is_playing(&self) -> bool {
        self.current.is_some() && (self.settings.looping || self.remaining > 0.0)
    }

    fn advance(&mut self, dt: f32) {
        if self.settings.looping {
            return;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining <= 0.0 {
            self.current = None;
        }
    }
}

type SourceFactory = Box<dyn Fn(&AlertSettings) -> Box<dyn AlertSource>>;

/// The single alert service shared by a swarm
pub struct FleeAlert {
    settings: AlertSettings,
    source: Option<Box<dyn AlertSource>>,
    factory: SourceFactory,
    plays: u64,
    rebuilds: u64,
}

/// Handle passed to every fly controller
pub type SharedAlert = Rc<RefCell<FleeAlert>>;

impl FleeAlert {
    /// Create an alert whose source is built by `factory` on first use
    pub fn new<F>(settings: AlertSettings, factory: F) -> Self
    where
        F: Fn(&AlertSettings) -> Box<dyn AlertSource> + 'static,
    {
        Self {
            settings,
            source: None,
            factory: Box::new(factory),
            plays: 0,
            rebuilds: 0,
        }
    }

    /// Alert backed by a `ClipPlayer`
    pub fn headless(settings: AlertSettings) -> Self {
        Self::new(settings, |s| Box::new(ClipPlayer::new(*s)))
    }

    pub fn into_shared(self) -> SharedAlert {
        Rc::new(RefCell::new(self))
    }

    pub fn settings(&self) -> &AlertSettings {
        &self.settings
    }

    fn source_mut(&mut self) -> &mut Box<dyn AlertSource> {
        if self.source.is_none() {
            if self.rebuilds > 0 {
                log::debug!("Flee alert source missing, re-creating it");
            }
            self.rebuilds += 1;
        }
        let settings = self.settings;
        let factory = &self.factory;
        self.source.get_or_insert_with(|| factory(&settings))
    }

    /// Whether the alert is currently sounding. Creates the source if needed.
    pub fn is_playing(&mut self) -> bool {
        self.source_mut().is_playing()
    }

    pub fn play(&mut self, clip: &SoundClip) {
        self.source_mut().play(clip);
        self.plays += 1;
        log::debug!("Flee alert '{}' started (play #{})", clip.name, self.plays);
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(source) = self.source.as_mut() {
            source.advance(dt);
        }
    }

    /// Drop the current source, e.g. when the entity that owned it is removed
    pub fn release(&mut self) {
        self.source = None;
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Number of times the alert has been started
    pub fn play_count(&self) -> u64 {
        self.plays
    }

    /// Number of sources created so far, including the first
    pub fn source_builds(&self) -> u64 {
        self.rebuilds
    }
}

impl Default for FleeAlert {
    fn default() -> Self {
        Self::headless(AlertSettings::default())
    }
}

impl std::fmt::Debug for FleeAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleeAlert")
            .field("settings", &self.settings)
            .field("has_source", &self.source.is_some())
            .field("plays", &self.plays)
            .finish()
    }
}
