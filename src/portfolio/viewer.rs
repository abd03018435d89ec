use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlImageElement, HtmlInputElement, HtmlMediaElement, HtmlVideoElement, KeyboardEvent};
use yew::prelude::*;

use crate::config;
use crate::portfolio::catalog::Project;
use crate::portfolio::media::HtmlVideo;
use crate::portfolio::modal::{ModalPhase, ViewerContent};
use crate::portfolio::player::{format_time, MediaEvent, PlaybackController, PlaybackState, PlayerSnapshot};

/// Swaps a broken image for the placeholder. Does nothing once the
/// placeholder itself is showing, so a missing placeholder can't loop.
pub fn on_image_error() -> Callback<Event> {
    Callback::from(|e: Event| {
        let img: HtmlImageElement = e.target_unchecked_into();
        let placeholder = config::placeholder_image_url();
        if let Some(next) = fallback_src(&img.src(), &placeholder) {
            log::warn!("Image failed to load, using placeholder: {}", img.src());
            img.set_src(next);
        }
    })
}

pub fn fallback_src<'a>(current: &str, placeholder: &'a str) -> Option<&'a str> {
    if current.ends_with(placeholder) {
        None
    } else {
        Some(placeholder)
    }
}

type SharedPlayer = Rc<RefCell<Option<PlaybackController<HtmlVideo>>>>;

fn update_player(
    player: &SharedPlayer,
    snapshot: &UseStateHandle<Option<PlayerSnapshot>>,
    f: impl FnOnce(&mut PlaybackController<HtmlVideo>),
) {
    if let Some(p) = player.borrow_mut().as_mut() {
        f(p);
        snapshot.set(Some(p.snapshot()));
    }
}

/// Replacing the handle drops, and so cancels, the previous timer.
fn schedule_hide(
    player: &SharedPlayer,
    snapshot: &UseStateHandle<Option<PlayerSnapshot>>,
    hide_timer: &Rc<RefCell<Option<Timeout>>>,
    token: Option<u64>,
) {
    *hide_timer.borrow_mut() = token.map(|token| {
        let player = player.clone();
        let snapshot = snapshot.clone();
        Timeout::new(config::CONTROLS_HIDE_MS, move || {
            update_player(&player, &snapshot, |p| {
                p.hide_controls(token);
            });
        })
    });
}

#[derive(Properties, PartialEq)]
pub struct VideoPlayerProps {
    pub src: String,
    pub captions_url: Option<String>,
    pub poster: String,
    pub autoplay: bool,
    pub on_exit: Callback<()>,
    pub on_playing_change: Callback<bool>,
}

#[function_component(VideoPlayer)]
pub fn video_player(props: &VideoPlayerProps) -> Html {
    let video_ref = use_node_ref();
    let container_ref = use_node_ref();
    let player: SharedPlayer = use_mut_ref(|| None);
    let hide_timer = use_mut_ref(|| None::<Timeout>);
    let snapshot = use_state(|| None::<PlayerSnapshot>);
    let has_captions = props.captions_url.is_some();

    // Attach the controller once the <video> exists; dropping it on unmount
    // stops playback and frees the element.
    {
        let video_ref = video_ref.clone();
        let container_ref = container_ref.clone();
        let player = player.clone();
        let hide_timer = hide_timer.clone();
        let snapshot = snapshot.clone();
        let on_playing_change = props.on_playing_change.clone();
        let autoplay = props.autoplay;
        use_effect_with_deps(
            move |_| {
                if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                    let mut controller = PlaybackController::new(HtmlVideo::new(video), has_captions);
                    controller.start(autoplay);
                    let playing = controller.state().is_playing;
                    snapshot.set(Some(controller.snapshot()));
                    *player.borrow_mut() = Some(controller);
                    // Paused until the element reports `playing`, so a
                    // blocked autoplay never reads as playing.
                    on_playing_change.emit(playing);
                } else {
                    log::error!("Video element missing on mount");
                }
                if let Some(container) = container_ref.cast::<HtmlElement>() {
                    if let Err(e) = container.focus() {
                        log::warn!("Failed to focus video player: {:?}", e);
                    }
                }
                move || {
                    hide_timer.borrow_mut().take();
                    player.borrow_mut().take();
                }
            },
            (),
        );
    }

    let dispatch = {
        let player = player.clone();
        let snapshot = snapshot.clone();
        let hide_timer = hide_timer.clone();
        let on_playing_change = props.on_playing_change.clone();
        Callback::from(move |event: MediaEvent| {
            let mut changed = None;
            let mut token = None;
            update_player(&player, &snapshot, |p| {
                let before = p.state().is_playing;
                p.handle_event(event);
                let after = p.state().is_playing;
                if before != after {
                    changed = Some(after);
                    token = p.pointer_moved();
                }
            });
            if let Some(playing) = changed {
                schedule_hide(&player, &snapshot, &hide_timer, token);
                on_playing_change.emit(playing);
            }
        })
    };

    let media_listener = |to_event: fn(&HtmlMediaElement) -> MediaEvent| {
        let dispatch = dispatch.clone();
        Callback::from(move |e: Event| {
            let element: HtmlMediaElement = e.target_unchecked_into();
            dispatch.emit(to_event(&element));
        })
    };

    let toggle_play = {
        let player = player.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |_: MouseEvent| update_player(&player, &snapshot, |p| p.toggle_play()))
    };

    let on_key_down = {
        let player = player.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == " " {
                e.prevent_default();
                update_player(&player, &snapshot, |p| p.toggle_play());
            }
        })
    };

    let toggle_mute = {
        let player = player.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |_: MouseEvent| update_player(&player, &snapshot, |p| p.toggle_mute()))
    };

    let toggle_captions = {
        let player = player.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |_: MouseEvent| update_player(&player, &snapshot, |p| p.toggle_captions()))
    };

    let on_seek = {
        let player = player.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(seconds) = input.value().parse::<f64>() {
                update_player(&player, &snapshot, |p| p.seek(seconds));
            }
        })
    };

    let on_volume = {
        let player = player.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(volume) = input.value().parse::<f64>() {
                update_player(&player, &snapshot, |p| p.set_volume(volume));
            }
        })
    };

    let on_mouse_move = {
        let player = player.clone();
        let snapshot = snapshot.clone();
        let hide_timer = hide_timer.clone();
        Callback::from(move |_: MouseEvent| {
            let mut token = None;
            update_player(&player, &snapshot, |p| token = p.pointer_moved());
            schedule_hide(&player, &snapshot, &hide_timer, token);
        })
    };

    let on_mouse_leave = {
        let player = player.clone();
        let snapshot = snapshot.clone();
        let hide_timer = hide_timer.clone();
        Callback::from(move |_: MouseEvent| {
            hide_timer.borrow_mut().take();
            update_player(&player, &snapshot, |p| p.pointer_left());
        })
    };

    let on_exit = {
        let on_exit = props.on_exit.clone();
        Callback::from(move |_: MouseEvent| on_exit.emit(()))
    };

    let view = (*snapshot).clone().unwrap_or(PlayerSnapshot {
        playback: PlaybackState::default(),
        controls_visible: true,
        has_captions,
    });
    let playback = &view.playback;

    html! {
        <div
            ref={container_ref}
            class="video-player"
            tabindex="0"
            role="region"
            aria-label="Video Player"
            onmousemove={on_mouse_move}
            onmouseleave={on_mouse_leave}
            onkeydown={on_key_down}
        >
            <video
                ref={video_ref}
                src={props.src.clone()}
                poster={props.poster.clone()}
                class={classes!("video-surface", (!playback.is_loaded).then_some("buffering"))}
                playsinline=true
                crossorigin="anonymous"
                onclick={toggle_play.clone()}
                onloadedmetadata={media_listener(|el| MediaEvent::LoadedMetadata { duration: el.duration() })}
                onloadeddata={media_listener(|_| MediaEvent::LoadedData)}
                ontimeupdate={media_listener(|el| MediaEvent::TimeUpdate { current_time: el.current_time() })}
                onplay={media_listener(|_| MediaEvent::Play)}
                onplaying={media_listener(|_| MediaEvent::Playing)}
                onpause={media_listener(|_| MediaEvent::Pause)}
                onwaiting={media_listener(|_| MediaEvent::Waiting)}
                onended={media_listener(|_| MediaEvent::Ended)}
                onerror={media_listener(|_| MediaEvent::Error)}
            >
                if let Some(url) = props.captions_url.clone() {
                    <track kind="captions" src={url} srclang="en" label="English" />
                }
            </video>
            if playback.failed {
                <div class="video-error">{"This demo can't be played right now."}</div>
            }
            <div class={classes!("video-controls", (!view.controls_visible).then_some("hidden"))}>
                <input
                    type="range"
                    class="seek-bar"
                    min="0"
                    max={playback.duration.to_string()}
                    step="0.1"
                    value={playback.current_time.to_string()}
                    oninput={on_seek}
                    aria-label="Seek"
                />
                <div class="video-controls-row">
                    <div class="video-controls-left">
                        <button onclick={toggle_play} aria-label={if playback.is_playing { "Pause" } else { "Play" }}>
                            <i class={if playback.is_playing { "fas fa-pause" } else { "fas fa-play" }}></i>
                        </button>
                        <button onclick={toggle_mute} aria-label={if playback.is_muted { "Unmute" } else { "Mute" }}>
                            <i class={if playback.is_muted { "fas fa-volume-xmark" } else { "fas fa-volume-high" }}></i>
                        </button>
                        <input
                            type="range"
                            class="volume-bar"
                            min="0"
                            max="1"
                            step="0.05"
                            value={playback.audible_volume().to_string()}
                            oninput={on_volume}
                            aria-label="Volume"
                        />
                        <span class="video-time">
                            {format!("{} / {}", format_time(playback.current_time), format_time(playback.duration))}
                        </span>
                    </div>
                    <div class="video-controls-right">
                        if view.has_captions {
                            <button
                                onclick={toggle_captions}
                                class={classes!(playback.captions_enabled.then_some("active"))}
                                aria-label="Toggle captions"
                            >
                                <i class="fas fa-closed-captioning"></i>
                            </button>
                        }
                        <button class="video-exit" onclick={on_exit}>{"Exit"}</button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectModalProps {
    pub project: Project,
    pub phase: ModalPhase,
    pub on_close: Callback<()>,
    pub on_watch_demo: Callback<()>,
    pub on_playing_change: Callback<bool>,
}

#[function_component(ProjectModal)]
pub fn project_modal(props: &ProjectModalProps) -> Html {
    // Escape closes the viewer
    {
        let on_close = props.on_close.clone();
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                    let callback = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                        if e.key() == "Escape" {
                            on_close.emit(());
                        }
                    });
                    if let Err(e) = window.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref()) {
                        log::warn!("Failed to listen for Escape: {:?}", e);
                    }
                    Box::new(move || {
                        if let Some(win) = web_sys::window() {
                            let _ = win.remove_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref());
                        }
                    })
                } else {
                    Box::new(|| ())
                };
                move || destructor()
            },
            (),
        );
    }

    let project = &props.project;
    let closing = props.phase == ModalPhase::Closing;
    let entering = props.phase == ModalPhase::Opening;
    let showing_video = matches!(
        props.phase,
        ModalPhase::Open(ViewerContent::VideoPlaying | ViewerContent::VideoPaused)
    );

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let watch_demo = {
        let on_watch_demo = props.on_watch_demo.clone();
        Callback::from(move |_: MouseEvent| on_watch_demo.emit(()))
    };
    let exit_video = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let media = match (&project.demo_video_url, showing_video) {
        (Some(src), true) => html! {
            <VideoPlayer
                key={project.id.clone()}
                src={src.clone()}
                captions_url={project.captions_url.clone()}
                poster={project.image_url.clone()}
                autoplay={props.phase == ModalPhase::Open(ViewerContent::VideoPlaying)}
                on_exit={exit_video}
                on_playing_change={props.on_playing_change.clone()}
            />
        },
        _ => html! {
            <div class="modal-preview">
                <img src={project.image_url.clone()} alt={project.title.clone()} onerror={on_image_error()} />
                <button class="modal-close" onclick={close.clone()} aria-label="Close">
                    <i class="fas fa-xmark"></i>
                </button>
                <div class="modal-preview-caption">
                    <h3>{&project.title}</h3>
                    if project.has_demo() {
                        <button class="watch-demo" onclick={watch_demo}>
                            <i class="fas fa-play"></i>{" Watch demo"}
                        </button>
                    }
                </div>
            </div>
        },
    };

    let modal_css = r#"
        .modal-backdrop {
            position: fixed;
            inset: 0;
            background: rgba(0, 0, 0, 0.8);
            z-index: 1000;
            transition: opacity 0.3s ease;
        }
        .modal-frame {
            position: fixed;
            inset: 0;
            display: flex;
            align-items: center;
            justify-content: center;
            z-index: 1001;
            pointer-events: none;
        }
        .modal-card {
            pointer-events: auto;
            width: min(960px, 92vw);
            max-height: 90vh;
            overflow-y: auto;
            border-radius: 12px;
            background: #1a1a1a;
            transition: opacity 0.3s ease, transform 0.3s ease;
        }
        .modal-card.entering, .modal-card.closing,
        .modal-backdrop.entering, .modal-backdrop.closing {
            opacity: 0;
        }
        .modal-card.entering, .modal-card.closing {
            transform: scale(0.96);
        }
        .video-player {
            position: relative;
            background: #000;
            outline: none;
        }
        .video-surface {
            width: 100%;
            display: block;
        }
        .video-surface.buffering {
            opacity: 0.6;
        }
        .video-controls {
            position: absolute;
            left: 0;
            right: 0;
            bottom: 0;
            padding: 0.5rem 1rem;
            background: linear-gradient(transparent, rgba(0, 0, 0, 0.8));
            transition: opacity 0.3s ease;
        }
        .video-controls.hidden {
            opacity: 0;
        }
        .video-controls-row {
            display: flex;
            justify-content: space-between;
            align-items: center;
        }
        .seek-bar {
            width: 100%;
        }
    "#;

    html! {
        <>
            <style>{modal_css}</style>
            <div class={classes!("modal-backdrop", closing.then_some("closing"), entering.then_some("entering"))} onclick={close} />
            <div class="modal-frame" role="dialog" aria-modal="true" aria-label={project.title.clone()}>
                <div class={classes!("modal-card", closing.then_some("closing"), entering.then_some("entering"))}>
                    <div class="modal-media">{media}</div>
                    <div class="modal-body">
                        <p>{project.summary()}</p>
                        <div class="modal-tags">
                            { for project.technologies.iter().map(|tech| html! {
                                <span key={tech.clone()} class="tech-tag">{tech}</span>
                            }) }
                        </div>
                    </div>
                </div>
            </div>
        </>
    }
}
