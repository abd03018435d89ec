use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlVideoElement, TextTrackMode};

use crate::portfolio::player::MediaElement;

/// [`MediaElement`] backed by a `<video>` in the page.
pub struct HtmlVideo {
    element: HtmlVideoElement,
}

impl HtmlVideo {
    pub fn new(element: HtmlVideoElement) -> Self {
        Self { element }
    }
}

impl MediaElement for HtmlVideo {
    fn play(&self) {
        match self.element.play() {
            Ok(promise) => spawn_local(async move {
                // Autoplay policies reject here; the element stays paused.
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("Video playback was not started: {:?}", e);
                }
            }),
            Err(e) => log::warn!("Video play() threw: {:?}", e),
        }
    }

    fn pause(&self) {
        if let Err(e) = self.element.pause() {
            log::warn!("Video pause() threw: {:?}", e);
        }
    }

    fn set_current_time(&self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn set_volume(&self, volume: f64) {
        self.element.set_volume(volume);
    }

    fn set_muted(&self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn set_captions_visible(&self, visible: bool) {
        let track = self.element.text_tracks().and_then(|tracks| tracks.get(0));
        if let Some(track) = track {
            track.set_mode(if visible {
                TextTrackMode::Showing
            } else {
                TextTrackMode::Hidden
            });
        }
    }

    fn release(&self) {
        self.pause();
        if let Err(e) = self.element.remove_attribute("src") {
            log::warn!("Failed to detach video source: {:?}", e);
        }
        self.element.load();
    }
}
