use std::collections::BTreeSet;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config;
use crate::content;
use crate::portfolio::catalog::{Project, ALL_CATEGORIES};
use crate::portfolio::filter::{FilterAction, FilterController};
use crate::portfolio::modal::ModalController;
use crate::portfolio::viewer::{on_image_error, ProjectModal};
use crate::utils::scroll_lock::ScrollLock;
use crate::utils::storage::LocalStorage;

impl Reducible for FilterController<LocalStorage> {
    type Action = FilterAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectCardProps {
    pub project: Project,
    pub selected_tags: BTreeSet<String>,
    pub on_open: Callback<(Project, bool)>,
}

#[function_component(ProjectCard)]
pub fn project_card(props: &ProjectCardProps) -> Html {
    let loaded = use_state(|| false);
    let project = &props.project;

    let on_load = {
        let loaded = loaded.clone();
        Callback::from(move |_: Event| loaded.set(true))
    };
    let view_details = {
        let on_open = props.on_open.clone();
        let project = project.clone();
        Callback::from(move |_: MouseEvent| on_open.emit((project.clone(), false)))
    };
    let view_demo = {
        let on_open = props.on_open.clone();
        let project = project.clone();
        Callback::from(move |_: MouseEvent| on_open.emit((project.clone(), true)))
    };

    html! {
        <article class="project-card">
            <div class={classes!("project-image", (!*loaded).then_some("loading"))}>
                <img
                    src={project.image_url.clone()}
                    alt={project.title.clone()}
                    loading="lazy"
                    onload={on_load}
                    onerror={on_image_error()}
                />
                <span class="project-category">{&project.category}</span>
            </div>
            <div class="project-content">
                <h3>{&project.title}</h3>
                <p>{&project.description}</p>
                <div class="project-tags">
                    { for project.technologies.iter().map(|tech| html! {
                        <span
                            key={tech.clone()}
                            class={classes!("tech-tag", props.selected_tags.contains(tech).then_some("highlighted"))}
                        >
                            {tech}
                        </span>
                    }) }
                </div>
                <div class="project-actions">
                    <button class="view-details" onclick={view_details}>{"View details"}</button>
                    if project.has_demo() {
                        <button class="view-demo" onclick={view_demo}>
                            <i class="fas fa-play"></i>{" View demo"}
                        </button>
                    }
                </div>
            </div>
        </article>
    }
}

/// Number of placeholder cards for the first-load phase.
fn skeleton_count(limit: Option<usize>) -> usize {
    limit.map_or(config::SKELETON_CARDS, |limit| limit.min(config::SKELETON_CARDS))
}

#[function_component(ProjectSkeleton)]
fn project_skeleton() -> Html {
    html! {
        <div class="project-card skeleton" aria-hidden="true">
            <div class="project-image loading"></div>
            <div class="project-content">
                <div class="skeleton-line wide"></div>
                <div class="skeleton-line"></div>
                <div class="skeleton-line short"></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PortfolioProps {
    /// Show at most this many matching projects.
    #[prop_or_default]
    pub limit: Option<usize>,
}

#[function_component(Portfolio)]
pub fn portfolio(props: &PortfolioProps) -> Html {
    let catalog = use_memo(|_| content::catalog(), ());
    let filters = use_reducer(|| FilterController::load(LocalStorage));
    let scroll_lock = use_context::<ScrollLock>().unwrap_or_else(ScrollLock::for_body);
    let modal = use_mut_ref(move || ModalController::new(scroll_lock));
    let enter_timer = use_mut_ref(|| None::<Timeout>);
    let exit_timer = use_mut_ref(|| None::<Timeout>);
    let redraw = use_force_update();
    let loading = use_state(|| true);

    {
        let loading = loading.clone();
        use_effect_with_deps(
            move |_| {
                let timer = Timeout::new(config::GALLERY_LOADING_MS, move || loading.set(false));
                move || drop(timer)
            },
            (),
        );
    }

    // Leaving the page mid-transition must not leave the body locked.
    {
        let modal = modal.clone();
        let enter_timer = enter_timer.clone();
        let exit_timer = exit_timer.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    enter_timer.borrow_mut().take();
                    exit_timer.borrow_mut().take();
                    modal.borrow_mut().teardown();
                }
            },
            (),
        );
    }

    let open_project = {
        let modal = modal.clone();
        let enter_timer = enter_timer.clone();
        let exit_timer = exit_timer.clone();
        let redraw = redraw.clone();
        Callback::from(move |(project, autoplay): (Project, bool)| {
            exit_timer.borrow_mut().take();
            let session = modal.borrow_mut().open(project, autoplay);
            let timer = {
                let modal = modal.clone();
                let redraw = redraw.clone();
                Timeout::new(config::MODAL_ENTER_MS, move || {
                    if modal.borrow_mut().finish_opening(session) {
                        redraw.force_update();
                    }
                })
            };
            *enter_timer.borrow_mut() = Some(timer);
            redraw.force_update();
        })
    };

    let close_modal = {
        let modal = modal.clone();
        let exit_timer = exit_timer.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            let ticket = modal.borrow_mut().close();
            if let Some(ticket) = ticket {
                let timer = {
                    let modal = modal.clone();
                    let redraw = redraw.clone();
                    Timeout::new(config::MODAL_EXIT_MS, move || {
                        if modal.borrow_mut().finish_close(ticket) {
                            redraw.force_update();
                        }
                    })
                };
                *exit_timer.borrow_mut() = Some(timer);
                redraw.force_update();
            }
        })
    };

    let watch_demo = {
        let modal = modal.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            if modal.borrow_mut().watch_demo() {
                redraw.force_update();
            }
        })
    };

    let playing_changed = {
        let modal = modal.clone();
        let redraw = redraw.clone();
        Callback::from(move |playing: bool| {
            modal.borrow_mut().set_playing(playing);
            redraw.force_update();
        })
    };

    let clear_filters = {
        let filters = filters.clone();
        Callback::from(move |_: MouseEvent| filters.dispatch(FilterAction::Clear))
    };

    let category_counts = catalog.count_by_category();
    let tag_counts = catalog.count_by_tag();
    let visible = filters.filtered_projects(&catalog, props.limit);
    let selected_tags = filters.state().selected_tags.clone();

    let category_button = |label: &str, count: usize| {
        let on_click = {
            let filters = filters.clone();
            let label = label.to_string();
            Callback::from(move |_: MouseEvent| filters.dispatch(FilterAction::ToggleCategory(label.clone())))
        };
        html! {
            <button
                key={label.to_string()}
                class={classes!("filter-button", filters.is_category_active(label).then_some("active"))}
                onclick={on_click}
            >
                {label}
                <span class="badge">{count}</span>
            </button>
        }
    };

    let modal_view = {
        let modal = modal.borrow();
        match modal.project() {
            Some(project) if modal.is_visible() => html! {
                <ProjectModal
                    project={project.clone()}
                    phase={modal.phase()}
                    on_close={close_modal}
                    on_watch_demo={watch_demo}
                    on_playing_change={playing_changed}
                />
            },
            _ => html! {},
        }
    };

    let gallery_css = r#"
        .portfolio-filters {
            display: flex;
            flex-direction: column;
            gap: 1rem;
            margin-bottom: 2rem;
        }
        .category-filters, .tag-filters {
            display: flex;
            flex-wrap: wrap;
            gap: 0.5rem;
        }
        .filter-button, .tag-chip {
            border: 1px solid rgba(126, 178, 255, 0.3);
            background: transparent;
            color: inherit;
            border-radius: 999px;
            padding: 0.4rem 1rem;
            cursor: pointer;
        }
        .filter-button.active, .tag-chip.active {
            background: #1E90FF;
            color: #fff;
        }
        .badge {
            margin-left: 0.5rem;
            font-size: 0.75rem;
            opacity: 0.7;
        }
        .project-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
            gap: 1.5rem;
        }
        .project-card {
            border-radius: 12px;
            overflow: hidden;
            background: rgba(30, 30, 30, 0.7);
        }
        .project-image {
            position: relative;
            aspect-ratio: 16/10;
        }
        .project-image.loading {
            background: rgba(126, 178, 255, 0.1);
        }
        .project-image img {
            width: 100%;
            height: 100%;
            object-fit: cover;
        }
        .tech-tag.highlighted {
            color: #1E90FF;
            font-weight: 600;
        }
        .skeleton-line {
            height: 0.9rem;
            width: 60%;
            margin-bottom: 0.75rem;
            border-radius: 4px;
            background: rgba(126, 178, 255, 0.1);
        }
        .skeleton-line.wide {
            width: 85%;
        }
        .skeleton-line.short {
            width: 35%;
        }
        .portfolio-empty {
            text-align: center;
            padding: 3rem 1rem;
        }
        @media (max-width: 768px) {
            .project-grid {
                grid-template-columns: 1fr;
            }
        }
    "#;

    html! {
        <section class="portfolio">
            <style>{gallery_css}</style>
            <div class="portfolio-filters">
                <div class="category-filters">
                    { category_button(ALL_CATEGORIES, catalog.projects().len()) }
                    { for catalog.categories().iter().map(|c| {
                        category_button(c, category_counts.get(c.as_str()).copied().unwrap_or(0))
                    }) }
                </div>
                <div class="tag-filters">
                    { for catalog.tags().iter().map(|tag| {
                        let on_click = {
                            let filters = filters.clone();
                            let tag = tag.clone();
                            Callback::from(move |_: MouseEvent| filters.dispatch(FilterAction::ToggleTag(tag.clone())))
                        };
                        html! {
                            <button
                                key={tag.clone()}
                                class={classes!("tag-chip", filters.is_tag_active(tag).then_some("active"))}
                                onclick={on_click}
                            >
                                {tag}
                                <span class="badge">{tag_counts.get(tag.as_str()).copied().unwrap_or(0)}</span>
                            </button>
                        }
                    }) }
                    if !filters.state().is_empty() {
                        <button class="clear-filters" onclick={clear_filters.clone()}>{"Clear all"}</button>
                    }
                </div>
            </div>
            if *loading {
                <div class="project-grid">
                    { for (0..skeleton_count(props.limit)).map(|i| html! { <ProjectSkeleton key={i} /> }) }
                </div>
            } else if visible.is_empty() {
                <div class="portfolio-empty">
                    <p>{"No projects match the selected filters."}</p>
                    <button onclick={clear_filters}>{"Reset filters"}</button>
                </div>
            } else {
                <div class="project-grid">
                    { for visible.into_iter().map(|project| html! {
                        <ProjectCard
                            key={project.id.clone()}
                            project={project.clone()}
                            selected_tags={selected_tags.clone()}
                            on_open={open_project.clone()}
                        />
                    }) }
                </div>
            }
            { modal_view }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_count_respects_limit() {
        assert_eq!(skeleton_count(None), config::SKELETON_CARDS);
        assert_eq!(skeleton_count(Some(3)), 3);
        assert_eq!(skeleton_count(Some(20)), config::SKELETON_CARDS);
    }
}
