use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label of the category button that clears the category selection.
pub const ALL_CATEGORIES: &str = "All Categories";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub full_description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub image_url: String,
    #[serde(default)]
    pub demo_video_url: Option<String>,
    #[serde(default)]
    pub captions_url: Option<String>,
}

impl Project {
    /// Whether a "watch demo" affordance may be offered.
    pub fn has_demo(&self) -> bool {
        self.demo_video_url.is_some()
    }

    /// Long-form description when there is one.
    pub fn summary(&self) -> &str {
        self.full_description.as_deref().unwrap_or(&self.description)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("project '{0}' has no category")]
    MissingCategory(String),
    #[error("duplicate project id '{0}'")]
    DuplicateId(String),
}

/// The static project list and the views derived from it.
///
/// Categories and tags are computed once at construction; the catalog never
/// changes at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    projects: Vec<Project>,
    categories: Vec<String>,
    tags: Vec<String>,
}

impl Catalog {
    /// Builds the catalog, leaving out entries that break its invariants.
    /// The first entry with a given id wins.
    pub fn new(entries: Vec<Project>) -> Self {
        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(entries.len());
        for project in entries {
            match validate(&project, &seen) {
                Ok(()) => {
                    seen.insert(project.id.clone());
                    projects.push(project);
                }
                Err(e) => log::warn!("Skipping catalog entry: {}", e),
            }
        }

        let mut categories: Vec<String> = Vec::new();
        for project in &projects {
            if !categories.contains(&project.category) {
                categories.push(project.category.clone());
            }
        }

        let tags = projects
            .iter()
            .flat_map(|p| p.technologies.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            projects,
            categories,
            tags,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distinct technologies, byte-wise sorted.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn count_by_category(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for project in &self.projects {
            *counts.entry(project.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Projects per technology; a project listing a tag twice counts once.
    pub fn count_by_tag(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for project in &self.projects {
            let distinct: BTreeSet<&str> = project.technologies.iter().map(String::as_str).collect();
            for tag in distinct {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        counts
    }
}

fn validate(project: &Project, seen: &HashSet<String>) -> Result<(), CatalogError> {
    if project.category.trim().is_empty() {
        return Err(CatalogError::MissingCategory(project.id.clone()));
    }
    if seen.contains(&project.id) {
        return Err(CatalogError::DuplicateId(project.id.clone()));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn project(id: &str, category: &str, technologies: &[&str]) -> Project {
    Project {
        id: id.to_string(),
        title: format!("Project {}", id),
        description: format!("Short description of {}", id),
        full_description: None,
        category: category.to_string(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        image_url: format!("/assets/{}.jpg", id),
        demo_video_url: None,
        captions_url: None,
    }
}
