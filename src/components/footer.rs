use yew::prelude::*;
use yew_router::components::Link;

use crate::content::{ADDRESS, COMPANY_NAME, CONTACT_EMAIL, CONTACT_PHONE, SERVICES};
use crate::Route;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <div class="footer-columns">
                <div class="footer-column">
                    <h4>{COMPANY_NAME}</h4>
                    <p>{ADDRESS}</p>
                </div>
                <div class="footer-column">
                    <h4>{"Services"}</h4>
                    <ul>
                        { for SERVICES.iter().map(|service| html! {
                            <li key={service.id}>
                                <Link<Route> to={Route::Services}>{service.title}</Link<Route>>
                            </li>
                        }) }
                    </ul>
                </div>
                <div class="footer-column">
                    <h4>{"Contact"}</h4>
                    <p><a href={format!("mailto:{}", CONTACT_EMAIL)}>{CONTACT_EMAIL}</a></p>
                    <p>{CONTACT_PHONE}</p>
                </div>
            </div>
            <p class="footer-legal">{format!("© {}. All rights reserved.", COMPANY_NAME)}</p>
        </footer>
    }
}
