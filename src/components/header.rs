use yew::prelude::*;
use yew_router::components::Link;
use yew_router::hooks::use_route;

use crate::content::COMPANY_NAME;
use crate::utils::theme::Theme;
use crate::Route;

const NAV_ITEMS: &[(Route, &str)] = &[
    (Route::Home, "Home"),
    (Route::Services, "Services"),
    (Route::Portfolio, "Portfolio"),
    (Route::About, "About"),
    (Route::Contact, "Contact"),
];

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub theme: Theme,
    pub on_toggle_theme: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let current = use_route::<Route>();
    let menu_open = use_state(|| false);

    // Navigating closes the mobile menu.
    {
        let menu_open = menu_open.clone();
        use_effect_with_deps(
            move |_| {
                menu_open.set(false);
                || ()
            },
            current.clone(),
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let toggle_theme = {
        let on_toggle_theme = props.on_toggle_theme.clone();
        Callback::from(move |_: MouseEvent| on_toggle_theme.emit(()))
    };

    html! {
        <header class="site-header">
            <nav class="top-nav">
                <Link<Route> to={Route::Home} classes="brand">
                    {COMPANY_NAME}
                </Link<Route>>
                <div class={classes!("nav-links", (*menu_open).then_some("open"))}>
                    { for NAV_ITEMS.iter().map(|(route, label)| {
                        let active = current.as_ref() == Some(route);
                        html! {
                            <Link<Route> to={route.clone()} classes={classes!("nav-link", active.then_some("active"))}>
                                {*label}
                            </Link<Route>>
                        }
                    }) }
                </div>
                <div class="nav-actions">
                    <button
                        class="theme-toggle"
                        onclick={toggle_theme}
                        aria-label={if props.theme.is_dark() { "Switch to light theme" } else { "Switch to dark theme" }}
                    >
                        <i class={if props.theme.is_dark() { "fas fa-sun" } else { "fas fa-moon" }}></i>
                    </button>
                    <button class="menu-toggle" onclick={toggle_menu} aria-label="Toggle navigation">
                        <i class={if *menu_open { "fas fa-xmark" } else { "fas fa-bars" }}></i>
                    </button>
                </div>
            </nav>
        </header>
    }
}
