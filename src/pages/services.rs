use yew::prelude::*;

use crate::content::SERVICES;

#[function_component(Services)]
pub fn services() -> Html {
    html! {
        <div class="services-page">
            <h1>{"Services"}</h1>
            { for SERVICES.iter().map(|service| html! {
                <section key={service.id} id={service.id} class="service-detail">
                    <i class={classes!("fas", service.icon)}></i>
                    <div>
                        <h2>{service.title}</h2>
                        <p>{service.description}</p>
                        <ul>
                            { for service.features.iter().map(|feature| html! {
                                <li><i class="fas fa-check"></i>{format!(" {}", feature)}</li>
                            }) }
                        </ul>
                    </div>
                </section>
            }) }
        </div>
    }
}
