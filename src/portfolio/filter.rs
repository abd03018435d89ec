use std::collections::BTreeSet;

use crate::config;
use crate::portfolio::catalog::{Catalog, Project, ALL_CATEGORIES};
use crate::utils::storage::{load_json, save_json, KeyValueStore};

/// Current selection on both filter dimensions. An empty set means the
/// dimension does not restrict anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub selected_categories: BTreeSet<String>,
    pub selected_tags: BTreeSet<String>,
}

impl FilterState {
    /// Dimensions are ANDed; values inside one dimension are ORed.
    pub fn matches(&self, project: &Project) -> bool {
        let category_ok = self.selected_categories.is_empty()
            || self.selected_categories.contains(&project.category);
        let tags_ok = self.selected_tags.is_empty()
            || project.technologies.iter().any(|t| self.selected_tags.contains(t));
        category_ok && tags_ok
    }

    pub fn is_empty(&self) -> bool {
        self.selected_categories.is_empty() && self.selected_tags.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    ToggleCategory(String),
    ToggleTag(String),
    Clear,
}

/// Owns the [`FilterState`] and mirrors every change into `store`.
#[derive(Clone)]
pub struct FilterController<S: KeyValueStore> {
    state: FilterState,
    store: S,
}

impl<S: KeyValueStore> FilterController<S> {
    /// Restores the selection saved by a previous session.
    pub fn load(store: S) -> Self {
        let selected_categories = load_set(&store, config::SELECTED_CATEGORIES_KEY);
        let selected_tags = load_set(&store, config::SELECTED_TAGS_KEY);
        Self {
            state: FilterState {
                selected_categories,
                selected_tags,
            },
            store,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn apply(&mut self, action: FilterAction) {
        match action {
            FilterAction::ToggleCategory(category) => self.toggle_category(&category),
            FilterAction::ToggleTag(tag) => self.toggle_tag(&tag),
            FilterAction::Clear => self.clear_filters(),
        }
    }

    /// `ALL_CATEGORIES` empties the selection, anything else flips membership.
    pub fn toggle_category(&mut self, category: &str) {
        if category == ALL_CATEGORIES {
            self.state.selected_categories.clear();
        } else {
            toggle(&mut self.state.selected_categories, category);
        }
        self.persist();
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        toggle(&mut self.state.selected_tags, tag);
        self.persist();
    }

    pub fn clear_filters(&mut self) {
        self.state = FilterState::default();
        self.persist();
    }

    pub fn matches(&self, project: &Project) -> bool {
        self.state.matches(project)
    }

    /// `ALL_CATEGORIES` is active exactly when no category is selected.
    pub fn is_category_active(&self, category: &str) -> bool {
        if category == ALL_CATEGORIES {
            self.state.selected_categories.is_empty()
        } else {
            self.state.selected_categories.contains(category)
        }
    }

    pub fn is_tag_active(&self, tag: &str) -> bool {
        self.state.selected_tags.contains(tag)
    }

    /// Matching projects in catalog order, truncated to `limit` after
    /// filtering.
    pub fn filtered_projects<'a>(&self, catalog: &'a Catalog, limit: Option<usize>) -> Vec<&'a Project> {
        catalog
            .projects()
            .iter()
            .filter(|p| self.matches(p))
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    fn persist(&self) {
        save_json(&self.store, config::SELECTED_CATEGORIES_KEY, &self.state.selected_categories);
        save_json(&self.store, config::SELECTED_TAGS_KEY, &self.state.selected_tags);
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

fn load_set<S: KeyValueStore>(store: &S, key: &str) -> BTreeSet<String> {
    load_json::<Vec<String>, S>(store, key)
        .map(|values| values.into_iter().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::catalog::project;
    use crate::utils::storage::MemoryStorage;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            project("fintech", "Web", &["React", "Node.js"]),
            project("health", "Mobile", &["Flutter", "Firebase"]),
            project("logistics", "Web", &["Next.js", "Python"]),
            project("wallet", "Mobile", &["React", "Swift"]),
            project("insights", "Data", &["Python"]),
        ])
    }

    fn ids(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.id.clone()).collect()
    }

    fn controller() -> FilterController<MemoryStorage> {
        FilterController::load(MemoryStorage::new())
    }

    #[test]
    fn empty_selection_matches_everything() {
        let filters = controller();
        assert_eq!(filters.filtered_projects(&catalog(), None).len(), 5);
    }

    #[test]
    fn category_and_tag_are_intersected() {
        let catalog = Catalog::new(vec![
            project("a", "Mobile", &["Flutter"]),
            project("b", "Web", &["React"]),
        ]);
        let mut filters = controller();
        filters.toggle_category("Mobile");
        filters.toggle_tag("React");
        assert!(filters.filtered_projects(&catalog, None).is_empty());
    }

    #[test]
    fn mobile_and_react_shows_only_mobile_react_projects() {
        let mut filters = controller();
        filters.toggle_category("Mobile");
        filters.toggle_tag("React");
        assert_eq!(ids(&filters.filtered_projects(&catalog(), None)), ["wallet"]);
    }

    #[test]
    fn values_within_a_dimension_are_unioned() {
        let mut filters = controller();
        filters.toggle_category("Mobile");
        filters.toggle_category("Data");
        assert_eq!(
            ids(&filters.filtered_projects(&catalog(), None)),
            ["health", "wallet", "insights"]
        );

        filters.clear_filters();
        filters.toggle_tag("Swift");
        filters.toggle_tag("Python");
        assert_eq!(
            ids(&filters.filtered_projects(&catalog(), None)),
            ["logistics", "wallet", "insights"]
        );
    }

    #[test]
    fn matches_agrees_with_the_definition_for_every_selection() {
        let catalog = catalog();
        let categories = ["Web", "Mobile", "Data"];
        let tags = ["React", "Python", "Flutter"];
        for cat_mask in 0..(1u32 << categories.len()) {
            for tag_mask in 0..(1u32 << tags.len()) {
                let mut filters = controller();
                for (i, c) in categories.iter().enumerate() {
                    if cat_mask & (1 << i) != 0 {
                        filters.toggle_category(c);
                    }
                }
                for (i, t) in tags.iter().enumerate() {
                    if tag_mask & (1 << i) != 0 {
                        filters.toggle_tag(t);
                    }
                }
                let state = filters.state().clone();
                for p in catalog.projects() {
                    let expected = (state.selected_categories.is_empty()
                        || state.selected_categories.contains(&p.category))
                        && (state.selected_tags.is_empty()
                            || p.technologies.iter().any(|t| state.selected_tags.contains(t)));
                    assert_eq!(filters.matches(p), expected, "{} with {:?}", p.id, state);
                }
            }
        }
    }

    #[test]
    fn toggling_a_tag_twice_restores_the_previous_set() {
        let mut filters = controller();
        filters.toggle_tag("Go");
        let before = filters.state().selected_tags.clone();
        filters.toggle_tag("React");
        filters.toggle_tag("React");
        assert_eq!(filters.state().selected_tags, before);
    }

    #[test]
    fn all_categories_always_clears() {
        let mut filters = controller();
        filters.toggle_category(ALL_CATEGORIES);
        assert!(filters.state().selected_categories.is_empty());

        filters.toggle_category("Web");
        filters.toggle_category("Mobile");
        filters.toggle_tag("React");
        filters.toggle_category(ALL_CATEGORIES);
        assert!(filters.state().selected_categories.is_empty());
        assert!(filters.is_category_active(ALL_CATEGORIES));
        assert!(filters.is_tag_active("React"));
    }

    #[test]
    fn clear_resets_both_dimensions() {
        let mut filters = controller();
        filters.toggle_category("Web");
        filters.toggle_tag("React");
        filters.apply(FilterAction::Clear);
        assert!(filters.state().is_empty());
    }

    #[test]
    fn limit_only_truncates() {
        let mut filters = controller();
        filters.toggle_tag("Python");
        let catalog = catalog();
        let all = filters.filtered_projects(&catalog, None);
        let capped = filters.filtered_projects(&catalog, Some(1));
        assert_eq!(ids(&capped), ["logistics"]);
        assert_eq!(ids(&all), ["logistics", "insights"]);
        assert_eq!(filters.filtered_projects(&catalog, Some(10)).len(), 2);
        assert!(filters.filtered_projects(&catalog, Some(0)).is_empty());
    }

    #[test]
    fn badge_counts_match_single_dimension_filters() {
        let catalog = catalog();
        for (category, count) in catalog.count_by_category() {
            let mut filters = controller();
            filters.toggle_category(category);
            assert_eq!(filters.filtered_projects(&catalog, None).len(), count);
        }
        for (tag, count) in catalog.count_by_tag() {
            let mut filters = controller();
            filters.toggle_tag(tag);
            assert_eq!(filters.filtered_projects(&catalog, None).len(), count);
        }
    }

    #[test]
    fn selection_survives_reload() {
        let store = MemoryStorage::new();
        let mut filters = FilterController::load(store.clone());
        filters.apply(FilterAction::ToggleTag("React".to_string()));
        filters.apply(FilterAction::ToggleCategory("Web".to_string()));

        let reloaded = FilterController::load(store);
        assert_eq!(reloaded.state(), filters.state());
        assert!(reloaded.is_tag_active("React"));
        assert!(reloaded.is_category_active("Web"));
    }

    #[test]
    fn last_write_wins_after_a_burst() {
        let store = MemoryStorage::new();
        let mut filters = FilterController::load(store.clone());
        for tag in ["React", "Go", "Python", "Go", "React"] {
            filters.toggle_tag(tag);
        }
        assert_eq!(store.raw(config::SELECTED_TAGS_KEY).as_deref(), Some("[\"Python\"]"));
        assert_eq!(store.raw(config::SELECTED_CATEGORIES_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn corrupt_storage_starts_empty() {
        let store = MemoryStorage::new();
        store.put_raw(config::SELECTED_TAGS_KEY, "not json");
        store.put_raw(config::SELECTED_CATEGORIES_KEY, "[\"Web\"]");
        let filters = FilterController::load(store);
        assert!(filters.state().selected_tags.is_empty());
        assert!(filters.is_category_active("Web"));
    }

    #[test]
    fn stored_duplicates_collapse() {
        let store = MemoryStorage::new();
        store.put_raw(config::SELECTED_TAGS_KEY, "[\"Go\",\"Go\"]");
        let filters = FilterController::load(store);
        assert_eq!(filters.state().selected_tags.len(), 1);
    }

    #[test]
    fn failed_writes_keep_the_in_memory_selection() {
        let mut filters = FilterController::load(MemoryStorage::read_only());
        filters.toggle_tag("React");
        assert!(filters.is_tag_active("React"));
    }
}
