/// The native video element, as far as the player needs it. Calls are
/// requests: the element reports what actually happened through
/// [`MediaEvent`]s.
#[cfg_attr(test, mockall::automock)]
pub trait MediaElement {
    fn play(&self);
    fn pause(&self);
    fn set_current_time(&self, seconds: f64);
    fn set_volume(&self, volume: f64);
    fn set_muted(&self, muted: bool);
    fn set_captions_visible(&self, visible: bool);
    /// Stops playback and lets go of the underlying resource.
    fn release(&self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    LoadedMetadata { duration: f64 },
    LoadedData,
    TimeUpdate { current_time: f64 },
    Play,
    Playing,
    Pause,
    Waiting,
    Ended,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: f64,
    /// Zero until metadata has loaded.
    pub duration: f64,
    pub volume: f64,
    pub is_muted: bool,
    pub captions_enabled: bool,
    pub is_loaded: bool,
    pub failed: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            is_muted: false,
            captions_enabled: false,
            is_loaded: false,
            failed: false,
        }
    }
}

impl PlaybackState {
    /// Volume the listener actually hears.
    pub fn audible_volume(&self) -> f64 {
        if self.is_muted {
            0.0
        } else {
            self.volume
        }
    }
}

/// Auto-hide for the control bar. Every poke supersedes the previous one, so
/// only the hide scheduled by the latest poke can take effect.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoHide {
    visible: bool,
    generation: u64,
}

impl Default for AutoHide {
    fn default() -> Self {
        Self {
            visible: true,
            generation: 0,
        }
    }
}

impl AutoHide {
    /// Shows the controls. Returns the token for a hide timer when one
    /// should run (only while playing).
    pub fn poke(&mut self, is_playing: bool) -> Option<u64> {
        self.visible = true;
        self.generation = self.generation.wrapping_add(1);
        is_playing.then_some(self.generation)
    }

    pub fn expire(&mut self, token: u64) -> bool {
        if token == self.generation && self.visible {
            self.visible = false;
            true
        } else {
            false
        }
    }

    /// Hides at once, e.g. when the pointer leaves a playing video.
    pub fn hide(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// What the control bar renders.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub playback: PlaybackState,
    pub controls_visible: bool,
    pub has_captions: bool,
}

/// Playback state machine around one media element.
///
/// The element is released when the controller is dropped.
pub struct PlaybackController<M: MediaElement> {
    media: M,
    state: PlaybackState,
    controls: AutoHide,
    has_captions: bool,
    released: bool,
}

impl<M: MediaElement> PlaybackController<M> {
    pub fn new(media: M, has_captions: bool) -> Self {
        Self {
            media,
            state: PlaybackState::default(),
            controls: AutoHide::default(),
            has_captions,
            released: false,
        }
    }

    /// Pushes the initial volume to the element and, if asked, tries to
    /// autoplay. A blocked autoplay simply never produces a `Playing` event.
    pub fn start(&mut self, autoplay: bool) {
        self.media.set_volume(self.state.volume);
        self.media.set_muted(self.state.is_muted);
        self.media.set_captions_visible(false);
        if autoplay {
            self.media.play();
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            playback: self.state.clone(),
            controls_visible: self.controls_visible(),
            has_captions: self.has_captions,
        }
    }

    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible() || !self.state.is_playing
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata { duration } => {
                self.state.duration = if duration.is_finite() && duration > 0.0 { duration } else { 0.0 };
                self.state.current_time = self.state.current_time.min(self.state.duration);
            }
            MediaEvent::LoadedData => self.state.is_loaded = true,
            MediaEvent::TimeUpdate { current_time } => {
                self.state.current_time = clamp_time(current_time, self.state.duration);
            }
            MediaEvent::Play => self.state.is_playing = true,
            MediaEvent::Playing => {
                self.state.is_playing = true;
                self.state.is_loaded = true;
            }
            MediaEvent::Pause | MediaEvent::Ended => {
                self.state.is_playing = false;
                self.controls.poke(false);
            }
            MediaEvent::Waiting => self.state.is_loaded = false,
            MediaEvent::Error => {
                log::warn!("Video failed to load or play");
                self.state.failed = true;
                self.state.is_playing = false;
            }
        }
    }

    pub fn play(&mut self) {
        self.media.play();
    }

    pub fn pause(&mut self) {
        self.media.pause();
    }

    pub fn toggle_play(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn seek(&mut self, seconds: f64) {
        let target = clamp_time(seconds, self.state.duration);
        self.state.current_time = target;
        self.media.set_current_time(target);
    }

    /// Clamped to `[0, 1]`. Zero mutes; a non-zero volume unmutes.
    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.state.volume = volume;
        self.media.set_volume(volume);
        let muted = volume == 0.0;
        if muted != self.state.is_muted {
            self.state.is_muted = muted;
            self.media.set_muted(muted);
        }
    }

    /// Flips mute without touching the stored volume.
    pub fn toggle_mute(&mut self) {
        self.state.is_muted = !self.state.is_muted;
        self.media.set_muted(self.state.is_muted);
    }

    /// No-op when the project ships no captions.
    pub fn toggle_captions(&mut self) {
        if !self.has_captions {
            return;
        }
        self.state.captions_enabled = !self.state.captions_enabled;
        self.media.set_captions_visible(self.state.captions_enabled);
    }

    /// Pointer activity over the player. Returns a hide token to schedule
    /// when controls should fade out later.
    pub fn pointer_moved(&mut self) -> Option<u64> {
        self.controls.poke(self.state.is_playing)
    }

    pub fn pointer_left(&mut self) {
        if self.state.is_playing {
            self.controls.hide();
        }
    }

    pub fn hide_controls(&mut self, token: u64) -> bool {
        self.controls.expire(token)
    }

    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.media.release();
        }
    }
}

impl<M: MediaElement> Drop for PlaybackController<M> {
    fn drop(&mut self) {
        self.release();
    }
}

fn clamp_time(seconds: f64, duration: f64) -> f64 {
    if seconds.is_nan() {
        return 0.0;
    }
    seconds.clamp(0.0, duration.max(0.0))
}

/// `M:SS`, with `0:00` for anything that isn't a positive number.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
