use crate::portfolio::catalog::Project;
use crate::utils::scroll_lock::{ScrollLock, ScrollLockGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerContent {
    StaticPreview,
    VideoPlaying,
    VideoPaused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Opening,
    Open(ViewerContent),
    Closing,
}

/// Proof that a particular close was started. Only the ticket of the
/// current session can finish a close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseTicket {
    session: u64,
}

/// One open project. Holding it keeps the page scroll locked.
struct ModalSession {
    project: Project,
    autoplay_requested: bool,
    _scroll: ScrollLockGuard,
}

/// Lifecycle of the project viewer overlay.
///
/// Each `open` starts a new session with a fresh id; timers scheduled for an
/// older session carry its id and are ignored once it has been replaced.
pub struct ModalController {
    scroll_lock: ScrollLock,
    session: Option<ModalSession>,
    phase: ModalPhase,
    session_id: u64,
}

impl ModalController {
    pub fn new(scroll_lock: ScrollLock) -> Self {
        Self {
            scroll_lock,
            session: None,
            phase: ModalPhase::Closed,
            session_id: 0,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn project(&self) -> Option<&Project> {
        self.session.as_ref().map(|s| &s.project)
    }

    pub fn autoplay_requested(&self) -> bool {
        self.session.as_ref().map_or(false, |s| s.autoplay_requested)
    }

    pub fn is_visible(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn is_closing(&self) -> bool {
        self.phase == ModalPhase::Closing
    }

    /// Shows `project`, replacing whatever is open or closing. Returns the
    /// session id to hand to [`finish_opening`](Self::finish_opening).
    pub fn open(&mut self, project: Project, autoplay: bool) -> u64 {
        // Take the new guard before the old session drops so the page never
        // flickers to unlocked in between.
        let guard = self.scroll_lock.acquire();
        self.session_id = self.session_id.wrapping_add(1);
        log::info!("Opening project viewer for '{}'", project.id);
        self.session = Some(ModalSession {
            project,
            autoplay_requested: autoplay,
            _scroll: guard,
        });
        self.phase = ModalPhase::Opening;
        self.session_id
    }

    /// Entry transition finished.
    pub fn finish_opening(&mut self, session_id: u64) -> bool {
        if session_id != self.session_id || self.phase != ModalPhase::Opening {
            return false;
        }
        let content = match &self.session {
            Some(s) if s.autoplay_requested && s.project.has_demo() => ViewerContent::VideoPlaying,
            Some(_) => ViewerContent::StaticPreview,
            None => return false,
        };
        self.phase = ModalPhase::Open(content);
        true
    }

    /// Switches a static preview over to the demo video.
    pub fn watch_demo(&mut self) -> bool {
        let has_demo = self.project().map_or(false, Project::has_demo);
        if has_demo && self.phase == ModalPhase::Open(ViewerContent::StaticPreview) {
            self.phase = ModalPhase::Open(ViewerContent::VideoPlaying);
            true
        } else {
            false
        }
    }

    /// Mirrors the player's actual play/pause state.
    pub fn set_playing(&mut self, playing: bool) {
        if let ModalPhase::Open(ViewerContent::VideoPlaying | ViewerContent::VideoPaused) = self.phase {
            self.phase = ModalPhase::Open(if playing {
                ViewerContent::VideoPlaying
            } else {
                ViewerContent::VideoPaused
            });
        }
    }

    /// Starts the exit transition. `None` when there is nothing to close or a
    /// close is already running.
    pub fn close(&mut self) -> Option<CloseTicket> {
        match self.phase {
            ModalPhase::Opening | ModalPhase::Open(_) => {
                self.phase = ModalPhase::Closing;
                Some(CloseTicket {
                    session: self.session_id,
                })
            }
            ModalPhase::Closing | ModalPhase::Closed => None,
        }
    }

    /// Exit transition finished. Clears the session only if `ticket` still
    /// belongs to it.
    pub fn finish_close(&mut self, ticket: CloseTicket) -> bool {
        if ticket.session != self.session_id || self.phase != ModalPhase::Closing {
            log::debug!("Ignoring stale close for session {}", ticket.session);
            return false;
        }
        self.reset();
        true
    }

    /// Immediate close, used when the owning view goes away.
    pub fn teardown(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.session = None;
        self.phase = ModalPhase::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::catalog::project;
    use crate::utils::scroll_lock::RecordingPage;
    use std::rc::Rc;

    fn with_demo(id: &str) -> Project {
        let mut p = project(id, "Web", &["React"]);
        p.demo_video_url = Some(format!("/videos/{}.mp4", id));
        p
    }

    fn setup() -> (ModalController, Rc<RecordingPage>) {
        let page = Rc::new(RecordingPage::default());
        (ModalController::new(ScrollLock::new(page.clone())), page)
    }

    #[test]
    fn autoplay_with_video_settles_into_playing() {
        let (mut modal, page) = setup();
        let id = modal.open(with_demo("a"), true);
        assert_eq!(modal.phase(), ModalPhase::Opening);
        assert!(page.locked.get());
        assert!(modal.finish_opening(id));
        assert_eq!(modal.phase(), ModalPhase::Open(ViewerContent::VideoPlaying));
    }

    #[test]
    fn autoplay_without_video_shows_static_preview() {
        let (mut modal, _page) = setup();
        let id = modal.open(project("a", "Web", &[]), true);
        modal.finish_opening(id);
        assert_eq!(modal.phase(), ModalPhase::Open(ViewerContent::StaticPreview));
        assert!(!modal.watch_demo());
    }

    #[test]
    fn details_then_watch_demo() {
        let (mut modal, _page) = setup();
        let id = modal.open(with_demo("a"), false);
        modal.finish_opening(id);
        assert_eq!(modal.phase(), ModalPhase::Open(ViewerContent::StaticPreview));
        assert!(modal.watch_demo());
        assert_eq!(modal.phase(), ModalPhase::Open(ViewerContent::VideoPlaying));
        modal.set_playing(false);
        assert_eq!(modal.phase(), ModalPhase::Open(ViewerContent::VideoPaused));
    }

    #[test]
    fn set_playing_ignored_for_static_preview() {
        let (mut modal, _page) = setup();
        let id = modal.open(with_demo("a"), false);
        modal.finish_opening(id);
        modal.set_playing(true);
        assert_eq!(modal.phase(), ModalPhase::Open(ViewerContent::StaticPreview));
    }

    #[test]
    fn close_keeps_project_until_transition_ends() {
        let (mut modal, page) = setup();
        let id = modal.open(with_demo("a"), false);
        modal.finish_opening(id);
        let ticket = modal.close().expect("open modal can close");
        assert!(modal.is_closing());
        assert_eq!(modal.project().map(|p| p.id.as_str()), Some("a"));
        assert!(page.locked.get());
        assert_eq!(modal.close(), None);

        assert!(modal.finish_close(ticket));
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(modal.project().is_none());
        assert!(!page.locked.get());
    }

    #[test]
    fn reopening_during_close_wins_over_stale_timer() {
        let (mut modal, page) = setup();
        let a = modal.open(with_demo("a"), false);
        modal.finish_opening(a);
        let stale = modal.close().expect("can close");

        let b = modal.open(with_demo("b"), true);
        assert_eq!(modal.phase(), ModalPhase::Opening);
        assert!(!modal.finish_opening(a));
        assert!(modal.finish_opening(b));

        assert!(!modal.finish_close(stale));
        assert_eq!(modal.phase(), ModalPhase::Open(ViewerContent::VideoPlaying));
        assert_eq!(modal.project().map(|p| p.id.as_str()), Some("b"));
        assert!(modal.autoplay_requested());
        assert!(page.locked.get());
        assert_eq!(*page.changes.borrow(), vec![true]);
    }

    #[test]
    fn stale_ticket_cannot_close_a_later_close() {
        let (mut modal, _page) = setup();
        modal.open(with_demo("a"), false);
        let stale = modal.close().expect("can close");
        modal.open(with_demo("b"), false);
        let current = modal.close().expect("can close");
        assert!(!modal.finish_close(stale));
        assert!(modal.is_closing());
        assert!(modal.finish_close(current));
    }

    #[test]
    fn close_during_opening_is_allowed() {
        let (mut modal, page) = setup();
        let id = modal.open(with_demo("a"), true);
        let ticket = modal.close().expect("opening modal can close");
        assert!(!modal.finish_opening(id));
        assert!(modal.finish_close(ticket));
        assert!(!page.locked.get());
    }

    #[test]
    fn teardown_releases_scroll_lock() {
        let (mut modal, page) = setup();
        let id = modal.open(with_demo("a"), false);
        modal.finish_opening(id);
        modal.close();
        modal.teardown();
        assert!(!modal.is_visible());
        assert!(!page.locked.get());
        assert_eq!(*page.changes.borrow(), vec![true, false]);
    }

    #[test]
    fn dropping_the_controller_releases_scroll_lock() {
        let (mut modal, page) = setup();
        modal.open(with_demo("a"), false);
        drop(modal);
        assert!(!page.locked.get());
    }

    #[test]
    fn blocked_autoplay_settles_modal_into_paused() {
        use crate::portfolio::player::{MediaEvent, MockMediaElement, PlaybackController};

        let (mut modal, _page) = setup();
        let id = modal.open(with_demo("a"), true);
        modal.finish_opening(id);
        assert_eq!(modal.phase(), ModalPhase::Open(ViewerContent::VideoPlaying));

        // play() is rejected by the browser, so no play events ever follow
        let mut media = MockMediaElement::new();
        media.expect_play().return_const(());
        media.expect_set_volume().return_const(());
        media.expect_set_muted().return_const(());
        media.expect_set_captions_visible().return_const(());
        media.expect_release().return_const(());
        let mut player = PlaybackController::new(media, false);
        player.start(true);
        modal.set_playing(player.state().is_playing);
        player.handle_event(MediaEvent::LoadedMetadata { duration: 30.0 });

        assert!(!player.state().is_playing);
        assert_eq!(modal.phase(), ModalPhase::Open(ViewerContent::VideoPaused));

        player.handle_event(MediaEvent::Playing);
        modal.set_playing(player.state().is_playing);
        assert_eq!(modal.phase(), ModalPhase::Open(ViewerContent::VideoPlaying));
    }

    #[test]
    fn close_on_closed_modal_is_noop() {
        let (mut modal, page) = setup();
        assert_eq!(modal.close(), None);
        modal.teardown();
        assert!(page.changes.borrow().is_empty());
    }
}
