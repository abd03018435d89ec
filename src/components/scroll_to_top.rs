use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::config::SCROLL_TOP_THRESHOLD_PX;

fn past_threshold(scroll_y: f64) -> bool {
    scroll_y > SCROLL_TOP_THRESHOLD_PX
}

#[function_component(ScrollToTop)]
pub fn scroll_to_top() -> Html {
    let visible = use_state(|| false);

    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                    let callback = Closure::<dyn Fn()>::new({
                        let visible = visible.clone();
                        move || {
                            if let Some(win) = web_sys::window() {
                                if let Ok(scroll_y) = win.scroll_y() {
                                    visible.set(past_threshold(scroll_y));
                                }
                            }
                        }
                    });
                    if let Err(e) = window.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref()) {
                        log::warn!("Failed to watch scroll position: {:?}", e);
                    }
                    if let Ok(scroll_y) = window.scroll_y() {
                        visible.set(past_threshold(scroll_y));
                    }
                    Box::new(move || {
                        if let Some(win) = web_sys::window() {
                            let _ = win.remove_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                        }
                    })
                } else {
                    Box::new(|| ())
                };
                move || {
                    destructor();
                }
            },
            (),
        );
    }

    let onclick = Callback::from(|_: MouseEvent| {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    });

    html! {
        <button
            class={classes!("scroll-to-top", (*visible).then_some("visible"))}
            onclick={onclick}
            aria-label="Scroll to top"
        >
            <i class="fas fa-arrow-up"></i>
        </button>
    }
}
