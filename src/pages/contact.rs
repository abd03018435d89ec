use yew::prelude::*;

use crate::content::{ADDRESS, CONTACT_EMAIL, CONTACT_PHONE};

#[function_component(Contact)]
pub fn contact() -> Html {
    html! {
        <div class="contact-page">
            <h1>{"Contact us"}</h1>
            <p class="page-intro">{"Tell us about your project and we'll get back within one business day."}</p>
            <ul class="contact-details">
                <li>
                    <i class="fas fa-envelope"></i>
                    <a href={format!("mailto:{}", CONTACT_EMAIL)}>{CONTACT_EMAIL}</a>
                </li>
                <li>
                    <i class="fas fa-phone"></i>
                    <a href={format!("tel:{}", CONTACT_PHONE.replace(' ', ""))}>{CONTACT_PHONE}</a>
                </li>
                <li>
                    <i class="fas fa-location-dot"></i>
                    <span>{ADDRESS}</span>
                </li>
            </ul>
        </div>
    }
}
