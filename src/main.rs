use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod config;
mod content;
mod pages;
mod portfolio;
mod utils;

use components::{footer::Footer, header::Header, scroll_to_top::ScrollToTop};
use pages::{about::About, contact::Contact, home::Home, portfolio::PortfolioPage, services::Services};
use utils::scroll_lock::ScrollLock;
use utils::storage::LocalStorage;
use utils::theme::Theme;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/services")]
    Services,
    #[at("/portfolio")]
    Portfolio,
    #[at("/about")]
    About,
    #[at("/contact")]
    Contact,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::Services => html! { <Services /> },
        Route::Portfolio => html! { <PortfolioPage /> },
        Route::About => html! { <About /> },
        Route::Contact => html! { <Contact /> },
        Route::NotFound => html! {
            <div class="not-found">
                <h1>{"Page not found"}</h1>
                <Link<Route> to={Route::Home}>{"Back to home"}</Link<Route>>
            </div>
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let theme = use_state(|| Theme::initial(&LocalStorage));
    let scroll_lock = use_state(ScrollLock::for_body);

    {
        let theme = *theme;
        use_effect_with_deps(
            move |_| {
                theme.apply();
                || ()
            },
            theme,
        );
    }

    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = theme.toggled();
            next.save(&LocalStorage);
            log::info!("Theme switched to {:?}", next);
            theme.set(next);
        })
    };

    html! {
        <ContextProvider<ScrollLock> context={(*scroll_lock).clone()}>
            <BrowserRouter>
                <Header theme={*theme} on_toggle_theme={toggle_theme} />
                <main class="site-main">
                    <Switch<Route> render={switch} />
                </main>
                <Footer />
                <ScrollToTop />
            </BrowserRouter>
        </ContextProvider<ScrollLock>>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Starting {}", content::COMPANY_NAME);
    yew::Renderer::<App>::new().render();
}
