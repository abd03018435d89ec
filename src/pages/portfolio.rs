use yew::prelude::*;

use crate::portfolio::gallery::Portfolio;

#[function_component(PortfolioPage)]
pub fn portfolio_page() -> Html {
    html! {
        <div class="portfolio-page">
            <h1>{"Our work"}</h1>
            <p class="page-intro">{"Filter by industry or technology to find projects like yours."}</p>
            <Portfolio />
        </div>
    }
}
