use yew::prelude::*;

use crate::content::{COMPANY_NAME, PROCESS_STEPS};

#[function_component(About)]
pub fn about() -> Html {
    html! {
        <div class="about-page">
            <h1>{format!("About {}", COMPANY_NAME)}</h1>
            <p>
                {"We are a software engineering studio building web platforms, mobile apps and cloud \
                  infrastructure for companies that need them to work the first time."}
            </p>
            <h2>{"Our process"}</h2>
            <ol class="process-steps">
                { for PROCESS_STEPS.iter().map(|(number, title, text)| html! {
                    <li key={*number}>
                        <h3>{*title}</h3>
                        <p>{*text}</p>
                    </li>
                }) }
            </ol>
        </div>
    }
}
