use yew::prelude::*;
use yew_router::components::Link;

use crate::config::HOME_PREVIEW_LIMIT;
use crate::content::{COMPANY_NAME, PROCESS_STEPS, SERVICES, TAGLINE};
use crate::portfolio::gallery::Portfolio;
use crate::Route;

#[function_component(Home)]
pub fn home() -> Html {
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    html! {
        <div class="home-page">
            <section class="hero">
                <h1>{COMPANY_NAME}</h1>
                <p class="hero-tagline">{TAGLINE}</p>
                <div class="hero-actions">
                    <Link<Route> to={Route::Contact} classes="cta-button">
                        {"Start a project"}
                    </Link<Route>>
                    <Link<Route> to={Route::Portfolio} classes="secondary-button">
                        {"See our work"}
                    </Link<Route>>
                </div>
            </section>

            <section class="services-overview">
                <h2>{"What we do"}</h2>
                <div class="service-grid">
                    { for SERVICES.iter().map(|service| html! {
                        <div key={service.id} class="service-card">
                            <i class={classes!("fas", service.icon)}></i>
                            <h3>{service.title}</h3>
                            <p>{service.description}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section class="process">
                <h2>{"How we work"}</h2>
                <ol class="process-steps">
                    { for PROCESS_STEPS.iter().map(|(number, title, text)| html! {
                        <li key={*number}>
                            <span class="step-number">{*number}</span>
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </li>
                    }) }
                </ol>
            </section>

            <section class="featured-work">
                <h2>{"Featured work"}</h2>
                <Portfolio limit={Some(HOME_PREVIEW_LIMIT)} />
                <Link<Route> to={Route::Portfolio} classes="secondary-button">
                    {"View full portfolio"}
                </Link<Route>>
            </section>

            <section class="cta">
                <h2>{"Have something in mind?"}</h2>
                <Link<Route> to={Route::Contact} classes="cta-button">
                    {"Talk to us"}
                </Link<Route>>
            </section>
        </div>
    }
}
