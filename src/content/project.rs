//! Project records from the content store.

use serde::{Deserialize, Serialize};

/// One portfolio project, as stored in the projects JSON document.
///
/// Only `id` and `title` are required in practice; everything else degrades
/// to empty values so a sparse record never breaks metadata synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub categories: Vec<String>,
    /// Ranking tier ("tier1" projects get a higher sitemap priority).
    pub tier: String,
    pub status: String,
    pub links: ProjectLinks,
    pub date_created: String,
    pub last_updated: Option<String>,
    pub problem_statement: Option<String>,
}

/// External links of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub github: Option<String>,
    pub demo: Option<String>,
}

impl Project {
    /// True for top-tier projects (drives sitemap priority).
    pub fn is_top_tier(&self) -> bool {
        self.tier == "tier1"
    }
}
